mod pool;
mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use pool::{PoolBuilder, QuestionPool, SESSION_LENGTH};
pub use progress::SessionProgress;
pub use service::{QuizSession, SessionPhase};
pub use view::{
    AnswerOption, BASELINE_TITLE, COMPARISON_TITLE, CategoryResult, Citation, FeatureCard,
    FeedbackView, QuestionBody, QuestionView, ResultsView, title_for,
};
pub use workflow::{CatalogState, QuizGame};
