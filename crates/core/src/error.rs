use thiserror::Error;

use crate::model::{CatalogError, FeatureError, QuestionError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Feature(#[from] FeatureError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Question(#[from] QuestionError),
}
