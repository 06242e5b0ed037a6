use thiserror::Error;

use crate::model::feature::{BaselineStatus, FeatureItem};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog contains no features")]
    Empty,
}

/// The loaded set of quiz-eligible features.
///
/// A catalog is never empty; an empty load is reported as `CatalogError::Empty`
/// so callers can refuse to start a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    features: Vec<FeatureItem>,
}

impl Catalog {
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` if `features` is empty.
    pub fn new(features: Vec<FeatureItem>) -> Result<Self, CatalogError> {
        if features.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { features })
    }

    #[must_use]
    pub fn features(&self) -> &[FeatureItem] {
        &self.features
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Always false for a constructed catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Number of features with the given status.
    #[must_use]
    pub fn count_status(&self, status: BaselineStatus) -> usize {
        self.features.iter().filter(|f| f.status() == status).count()
    }

    #[must_use]
    pub fn into_features(self) -> Vec<FeatureItem> {
        self.features
    }
}
