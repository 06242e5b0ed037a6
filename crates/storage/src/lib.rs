#![forbid(unsafe_code)]

pub mod catalog;
pub mod dataset;
pub mod repository;

pub use repository::{CatalogSource, InMemoryCatalog, StorageError};
