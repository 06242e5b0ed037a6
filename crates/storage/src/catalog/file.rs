use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use baseline_core::model::FeatureItem;

use super::{parse_catalog, to_catalog_json};
use crate::repository::{CatalogSource, StorageError};

/// Catalog stored as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `features` to this file, replacing its contents.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding or writing fails.
    pub async fn write(&self, features: &[FeatureItem]) -> Result<(), StorageError> {
        let json = to_catalog_json(features)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| map_io(&self.path, &e))
    }
}

#[async_trait]
impl CatalogSource for JsonFileCatalog {
    async fn load(&self) -> Result<Vec<FeatureItem>, StorageError> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| map_io(&self.path, &e))?;
        let features = parse_catalog(&json)?;
        tracing::debug!(path = %self.path.display(), count = features.len(), "read catalog file");
        Ok(features)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn map_io(path: &Path, err: &io::Error) -> StorageError {
    if err.kind() == io::ErrorKind::NotFound {
        StorageError::NotFound(path.display().to_string())
    } else {
        StorageError::Io(format!("{}: {err}", path.display()))
    }
}
