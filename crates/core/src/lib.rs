#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod version;

pub use error::Error;
