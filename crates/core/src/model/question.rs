use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::feature::{BaselineStatus, FeatureItem};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("unknown game mode: {0}")]
    UnknownMode(String),

    #[error("unknown answer: {0}")]
    UnknownAnswer(String),
}

//
// ─── GAME MODE ─────────────────────────────────────────────────────────────────
//

/// Which kinds of questions a session draws from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Status classification questions only.
    #[default]
    Baseline,
    /// Comparison questions interleaved with status questions.
    Mixed,
}

impl GameMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "baseline" => Ok(Self::Baseline),
            "mixed" => Ok(Self::Mixed),
            other => Err(QuestionError::UnknownMode(other.to_string())),
        }
    }
}

//
// ─── ANSWER TOKENS ─────────────────────────────────────────────────────────────
//

/// One of the two features in a comparison question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

impl Side {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
        }
    }

    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// What the player picked: a status for baseline questions, a side for comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerToken {
    Status(BaselineStatus),
    Side(Side),
}

impl AnswerToken {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Status(status) => status.as_str(),
            Self::Side(side) => side.as_str(),
        }
    }
}

impl fmt::Display for AnswerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerToken {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Self::Side(Side::A)),
            "b" => Ok(Self::Side(Side::B)),
            other => other
                .parse::<BaselineStatus>()
                .map(Self::Status)
                .map_err(|_| QuestionError::UnknownAnswer(other.to_string())),
        }
    }
}

impl From<BaselineStatus> for AnswerToken {
    fn from(status: BaselineStatus) -> Self {
        Self::Status(status)
    }
}

impl From<Side> for AnswerToken {
    fn from(side: Side) -> Self {
        Self::Side(side)
    }
}

//
// ─── QUESTIONS ─────────────────────────────────────────────────────────────────
//

/// "What is the baseline support status for this feature?"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaselineQuestion {
    feature: FeatureItem,
}

impl BaselineQuestion {
    #[must_use]
    pub fn new(feature: FeatureItem) -> Self {
        Self { feature }
    }

    #[must_use]
    pub fn feature(&self) -> &FeatureItem {
        &self.feature
    }

    #[must_use]
    pub fn correct_answer(&self) -> BaselineStatus {
        self.feature.status()
    }
}

/// "Which web feature was released more recently?"
///
/// Only constructible from two features with defined, distinct Chrome
/// versions, so every comparison has exactly one right answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonQuestion {
    feature_a: FeatureItem,
    feature_b: FeatureItem,
    version_a: u32,
    version_b: u32,
}

impl ComparisonQuestion {
    /// Pairs two features, or returns `None` when either version is undefined
    /// or both versions are equal.
    #[must_use]
    pub fn pair(feature_a: FeatureItem, feature_b: FeatureItem) -> Option<Self> {
        let version_a = feature_a.chrome_version()?;
        let version_b = feature_b.chrome_version()?;
        if version_a == version_b {
            return None;
        }
        Some(Self {
            feature_a,
            feature_b,
            version_a,
            version_b,
        })
    }

    #[must_use]
    pub fn feature(&self, side: Side) -> &FeatureItem {
        match side {
            Side::A => &self.feature_a,
            Side::B => &self.feature_b,
        }
    }

    #[must_use]
    pub fn version(&self, side: Side) -> u32 {
        match side {
            Side::A => self.version_a,
            Side::B => self.version_b,
        }
    }

    /// The side with the higher Chrome version.
    #[must_use]
    pub fn correct_answer(&self) -> Side {
        if self.version_a > self.version_b {
            Side::A
        } else {
            Side::B
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Baseline,
    Comparison,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Question {
    Baseline(BaselineQuestion),
    Comparison(ComparisonQuestion),
}

impl Question {
    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        match self {
            Self::Baseline(_) => QuestionKind::Baseline,
            Self::Comparison(_) => QuestionKind::Comparison,
        }
    }

    #[must_use]
    pub fn correct_answer(&self) -> AnswerToken {
        match self {
            Self::Baseline(q) => AnswerToken::Status(q.correct_answer()),
            Self::Comparison(q) => AnswerToken::Side(q.correct_answer()),
        }
    }

    /// Status bucket this question feeds in per-category stats.
    ///
    /// Comparison questions span two features and feed no bucket.
    #[must_use]
    pub fn baseline_status(&self) -> Option<BaselineStatus> {
        match self {
            Self::Baseline(q) => Some(q.correct_answer()),
            Self::Comparison(_) => None,
        }
    }

    /// Whether `token` is the right kind of answer for this question.
    #[must_use]
    pub fn accepts(&self, token: AnswerToken) -> bool {
        matches!(
            (self, token),
            (Self::Baseline(_), AnswerToken::Status(_)) | (Self::Comparison(_), AnswerToken::Side(_))
        )
    }
}

impl From<BaselineQuestion> for Question {
    fn from(question: BaselineQuestion) -> Self {
        Self::Baseline(question)
    }
}

impl From<ComparisonQuestion> for Question {
    fn from(question: ComparisonQuestion) -> Self {
        Self::Comparison(question)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FeatureId;

    fn feature(id: &str, status: BaselineStatus, support: Option<&str>) -> FeatureItem {
        let item = FeatureItem::new(FeatureId::new(id), id.to_uppercase(), "A feature.", status)
            .unwrap();
        match support {
            Some(s) => item.with_support_info(s),
            None => item,
        }
    }

    #[test]
    fn comparison_picks_higher_version() {
        let old = feature("old", BaselineStatus::High, Some("chrome: 50"));
        let new = feature("new", BaselineStatus::Low, Some("chrome: 120"));

        let q = ComparisonQuestion::pair(old.clone(), new.clone()).unwrap();
        assert_eq!(q.correct_answer(), Side::B);
        assert_eq!(q.version(Side::B), 120);

        let q = ComparisonQuestion::pair(new, old).unwrap();
        assert_eq!(q.correct_answer(), Side::A);
    }

    #[test]
    fn comparison_requires_distinct_defined_versions() {
        let a = feature("a", BaselineStatus::High, Some("chrome: 80"));
        let b = feature("b", BaselineStatus::High, Some("chrome: 80"));
        let none = feature("c", BaselineStatus::Unknown, None);
        let bogus = feature("d", BaselineStatus::Unknown, Some("chrome: 999"));

        assert!(ComparisonQuestion::pair(a.clone(), b).is_none());
        assert!(ComparisonQuestion::pair(a.clone(), none).is_none());
        assert!(ComparisonQuestion::pair(bogus, a).is_none());
    }

    #[test]
    fn baseline_question_feeds_its_status_bucket() {
        let q = Question::from(BaselineQuestion::new(feature("x", BaselineStatus::Low, None)));
        assert_eq!(q.baseline_status(), Some(BaselineStatus::Low));
        assert_eq!(q.correct_answer(), AnswerToken::Status(BaselineStatus::Low));
        assert!(q.accepts(AnswerToken::Status(BaselineStatus::High)));
        assert!(!q.accepts(AnswerToken::Side(Side::A)));
    }

    #[test]
    fn answer_tokens_parse_and_serialize_bare() {
        assert_eq!("A".parse::<AnswerToken>().unwrap(), AnswerToken::Side(Side::A));
        assert_eq!(
            "unknown".parse::<AnswerToken>().unwrap(),
            AnswerToken::Status(BaselineStatus::Unknown)
        );
        assert!("c".parse::<AnswerToken>().is_err());

        let json = serde_json::to_string(&AnswerToken::Side(Side::B)).unwrap();
        assert_eq!(json, "\"b\"");
        let token: AnswerToken = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(token, AnswerToken::Status(BaselineStatus::High));
    }

    #[test]
    fn game_mode_parses() {
        assert_eq!("Mixed".parse::<GameMode>().unwrap(), GameMode::Mixed);
        assert!(matches!(
            "trivia".parse::<GameMode>(),
            Err(QuestionError::UnknownMode(_))
        ));
    }
}
