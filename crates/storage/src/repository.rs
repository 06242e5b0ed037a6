use async_trait::async_trait;
use baseline_core::model::FeatureItem;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by catalog sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("http error: {0}")]
    Http(String),

    #[error("http request failed with status {0}")]
    HttpStatus(u16),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Where the quiz catalog comes from.
///
/// Sources are read once at startup; implementations must not cache partial
/// results across calls.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Load every feature record from the source.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source cannot be read or decoded.
    async fn load(&self) -> Result<Vec<FeatureItem>, StorageError>;

    /// Short description of the source for logs and user-facing notices.
    fn describe(&self) -> String;
}

/// Catalog held in memory, used by tests and embedders that already have the data.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    features: Arc<Mutex<Vec<FeatureItem>>>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new(features: Vec<FeatureItem>) -> Self {
        Self {
            features: Arc::new(Mutex::new(features)),
        }
    }

    /// Replace the stored features.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the lock is poisoned.
    pub fn replace(&self, features: Vec<FeatureItem>) -> Result<(), StorageError> {
        let mut guard = self
            .features
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        *guard = features;
        Ok(())
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn load(&self) -> Result<Vec<FeatureItem>, StorageError> {
        let guard = self
            .features
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(guard.clone())
    }

    fn describe(&self) -> String {
        "in-memory catalog".to_string()
    }
}
