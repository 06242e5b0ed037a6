use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of a web feature, e.g. `"container-queries"`.
///
/// Catalog records written by older generators may omit it, so the empty
/// identifier is a valid default.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(String);

impl FeatureId {
    /// Creates a new `FeatureId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Unique identifier for a quiz session
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a fresh random `SessionId`
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the underlying UUID
    #[must_use]
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl fmt::Debug for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeatureId({:?})", self.0)
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for FeatureId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(ParseIdError {
                kind: "FeatureId".to_string(),
            });
        }
        Ok(FeatureId::new(trimmed))
    }
}

impl FromStr for SessionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(SessionId::from_uuid)
            .map_err(|_| ParseIdError {
                kind: "SessionId".to_string(),
            })
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_id_display() {
        let id = FeatureId::new("container-queries");
        assert_eq!(id.to_string(), "container-queries");
    }

    #[test]
    fn feature_id_from_str_rejects_blank_and_spaces() {
        assert!("".parse::<FeatureId>().is_err());
        assert!("two words".parse::<FeatureId>().is_err());
        assert_eq!(" grid ".parse::<FeatureId>().unwrap(), FeatureId::new("grid"));
    }

    #[test]
    fn feature_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&FeatureId::new("has")).unwrap();
        assert_eq!(json, "\"has\"");
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(SessionId::random(), SessionId::random());
    }

    #[test]
    fn session_id_roundtrip() {
        let id = SessionId::random();
        let parsed: SessionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!("not-a-uuid".parse::<SessionId>().is_err());
    }
}
