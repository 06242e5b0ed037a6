mod answer;
mod catalog;
mod feature;
mod ids;
mod question;
mod stats;

pub use url::Url;

pub use answer::AnswerRecord;
pub use catalog::{Catalog, CatalogError};
pub use feature::{BaselineStatus, FeatureError, FeatureItem};
pub use ids::{FeatureId, ParseIdError, SessionId};
pub use question::{
    AnswerToken, BaselineQuestion, ComparisonQuestion, GameMode, Question, QuestionError,
    QuestionKind, Side,
};
pub use stats::{CategoryStats, Tally};
