//! Catalog resource sources and the JSON codec shared by them.

mod file;
mod http;

pub use file::JsonFileCatalog;
pub use http::HttpCatalog;

use baseline_core::model::FeatureItem;

use crate::repository::{CatalogSource, StorageError};

/// Decode a catalog resource: a JSON array of feature records.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the text is not a valid catalog.
pub fn parse_catalog(json: &str) -> Result<Vec<FeatureItem>, StorageError> {
    serde_json::from_str(json).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Encode features as a pretty-printed catalog resource.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn to_catalog_json(features: &[FeatureItem]) -> Result<String, StorageError> {
    serde_json::to_string_pretty(features).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Pick a source for `location`: `http(s)://` URLs are fetched, anything else is a file path.
#[must_use]
pub fn source_for(location: &str) -> Box<dyn CatalogSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpCatalog::new(location))
    } else {
        Box::new(JsonFileCatalog::new(location))
    }
}
