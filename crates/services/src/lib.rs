#![forbid(unsafe_code)]

pub mod error;
pub mod randomness;
pub mod sessions;

pub use error::QuizError;
pub use randomness::Randomness;

pub use sessions::{
    AnswerOption, CatalogState, CategoryResult, Citation, FeatureCard, FeedbackView, PoolBuilder,
    QuestionBody, QuestionPool, QuestionView, QuizGame, QuizSession, ResultsView, SESSION_LENGTH,
    SessionPhase, SessionProgress,
};
