use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

use crate::model::ids::FeatureId;
use crate::version::chrome_version;

const DOCS_SEARCH_URL: &str = "https://developer.mozilla.org/en-US/search";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FeatureError {
    #[error("feature name cannot be empty")]
    EmptyName,

    #[error("feature description cannot be empty")]
    EmptyDescription,

    #[error("unknown baseline status: {0}")]
    UnknownStatus(String),
}

//
// ─── BASELINE STATUS ───────────────────────────────────────────────────────────
//

/// Baseline support tier of a web feature.
///
/// - `High`: widely available across browsers for a long time
/// - `Low`: newly available in all core browsers
/// - `Unknown`: limited or no cross-browser support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaselineStatus {
    High,
    Low,
    Unknown,
}

impl BaselineStatus {
    /// All statuses in display order.
    pub const ALL: [BaselineStatus; 3] = [Self::High, Self::Low, Self::Unknown];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
            Self::Unknown => "unknown",
        }
    }

    /// Human-readable label shown to players.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "Baseline 2024+ (High)",
            Self::Low => "Baseline 2024 (Low)",
            Self::Unknown => "Unknown/Limited Support",
        }
    }
}

impl fmt::Display for BaselineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BaselineStatus {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "low" => Ok(Self::Low),
            "unknown" => Ok(Self::Unknown),
            other => Err(FeatureError::UnknownStatus(other.to_string())),
        }
    }
}

//
// ─── FEATURE ITEM ──────────────────────────────────────────────────────────────
//

/// A quiz-eligible web feature as it appears in the catalog resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureItem {
    #[serde(default)]
    id: FeatureId,
    name: String,
    description: String,
    status: BaselineStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    #[serde(default)]
    support_info: Option<String>,
}

impl FeatureItem {
    /// Creates a feature with validated name and description.
    ///
    /// # Errors
    ///
    /// Returns `FeatureError::EmptyName` or `FeatureError::EmptyDescription`
    /// when either is blank.
    pub fn new(
        id: FeatureId,
        name: impl Into<String>,
        description: impl Into<String>,
        status: BaselineStatus,
    ) -> Result<Self, FeatureError> {
        let name = name.into().trim().to_string();
        let description = description.into().trim().to_string();
        if name.is_empty() {
            return Err(FeatureError::EmptyName);
        }
        if description.is_empty() {
            return Err(FeatureError::EmptyDescription);
        }

        Ok(Self {
            id,
            name,
            description,
            status,
            status_label: Some(status.label().to_string()),
            group: None,
            support_info: None,
        })
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[must_use]
    pub fn with_support_info(mut self, support_info: impl Into<String>) -> Self {
        self.support_info = Some(support_info.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> &FeatureId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn status(&self) -> BaselineStatus {
        self.status
    }

    /// Stored label, falling back to the canonical label for the status.
    #[must_use]
    pub fn status_label(&self) -> &str {
        self.status_label
            .as_deref()
            .unwrap_or_else(|| self.status.label())
    }

    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    #[must_use]
    pub fn support_info(&self) -> Option<&str> {
        self.support_info.as_deref()
    }

    /// Chrome version this feature shipped in, if the support data has a usable one.
    #[must_use]
    pub fn chrome_version(&self) -> Option<u32> {
        self.support_info.as_deref().and_then(chrome_version)
    }

    /// Documentation search link for this feature.
    #[must_use]
    pub fn documentation_url(&self) -> Url {
        let mut url = Url::parse(DOCS_SEARCH_URL).expect("documentation base url is valid");
        url.query_pairs_mut().append_pair("q", &self.name);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> FeatureItem {
        FeatureItem::new(
            FeatureId::new("grid"),
            "Grid",
            "Two-dimensional layout system.",
            BaselineStatus::High,
        )
        .unwrap()
    }

    #[test]
    fn rejects_blank_name_and_description() {
        let err = FeatureItem::new(FeatureId::default(), "  ", "desc", BaselineStatus::Low)
            .unwrap_err();
        assert_eq!(err, FeatureError::EmptyName);
        let err =
            FeatureItem::new(FeatureId::default(), "Name", "", BaselineStatus::Low).unwrap_err();
        assert_eq!(err, FeatureError::EmptyDescription);
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<BaselineStatus>().unwrap(), BaselineStatus::High);
        assert!(matches!(
            "limited".parse::<BaselineStatus>(),
            Err(FeatureError::UnknownStatus(s)) if s == "limited"
        ));
    }

    #[test]
    fn deserializes_catalog_record() {
        let json = r#"{
            "id": "dialog",
            "name": "<dialog>",
            "description": "The dialog element represents a modal or non-modal dialog box.",
            "status": "high",
            "statusLabel": "Baseline 2024+ (High)",
            "group": "html",
            "supportInfo": "chrome: 37, edge: 79, firefox: 98, safari: 15.4"
        }"#;
        let item: FeatureItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id().as_str(), "dialog");
        assert_eq!(item.status(), BaselineStatus::High);
        assert_eq!(item.group(), Some("html"));
        assert_eq!(item.chrome_version(), Some(37));
    }

    #[test]
    fn missing_id_and_null_support_are_accepted() {
        let json = r#"{"name":"X","description":"Some feature","status":"unknown","supportInfo":null}"#;
        let item: FeatureItem = serde_json::from_str(json).unwrap();
        assert!(item.id().is_empty());
        assert_eq!(item.support_info(), None);
        assert_eq!(item.chrome_version(), None);
        assert_eq!(item.status_label(), "Unknown/Limited Support");
    }

    #[test]
    fn documentation_url_encodes_name() {
        let item = FeatureItem::new(
            FeatureId::new("dialog"),
            "<dialog> & friends",
            "Modal dialogs.",
            BaselineStatus::High,
        )
        .unwrap();
        let url = item.documentation_url();
        assert_eq!(url.host_str(), Some("developer.mozilla.org"));
        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "q");
        assert_eq!(value, "<dialog> & friends");
    }

    #[test]
    fn builder_sets_optional_fields() {
        let item = grid().with_group("css").with_support_info("chrome: 57");
        assert_eq!(item.group(), Some("css"));
        assert_eq!(item.chrome_version(), Some(57));
    }
}
