//! Shared error types for the services crate.

use thiserror::Error;

use baseline_core::model::{AnswerToken, CatalogError, QuestionKind};
use storage::repository::StorageError;

use crate::sessions::SessionPhase;

/// Errors emitted by the quiz session and game controller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("catalog unavailable: {reason}")]
    CatalogUnavailable { reason: String },
    #[error("catalog is still loading")]
    CatalogPending,
    #[error("no questions could be built for the session")]
    EmptyPool,
    #[error("cannot {operation} while the question is {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: SessionPhase,
    },
    #[error("answer {token} does not fit a {kind:?} question")]
    MismatchedAnswer {
        token: AnswerToken,
        kind: QuestionKind,
    },
    #[error("no active session")]
    NoActiveSession,
}

impl From<CatalogError> for QuizError {
    fn from(err: CatalogError) -> Self {
        Self::CatalogUnavailable {
            reason: err.to_string(),
        }
    }
}

impl From<StorageError> for QuizError {
    fn from(err: StorageError) -> Self {
        Self::CatalogUnavailable {
            reason: err.to_string(),
        }
    }
}
