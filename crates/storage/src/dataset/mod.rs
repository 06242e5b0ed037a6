//! The raw web-features dataset and what we derive from it.
//!
//! Only the fields the catalog generator and the exploration report read are
//! modelled; everything else in the upstream JSON is ignored.

mod generate;
mod report;

pub use generate::{GeneratedCatalog, GeneratorConfig, MIN_DESCRIPTION_LEN, eligible_features, generate};
pub use report::{DatasetReport, StatusExample};

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::repository::StorageError;

/// Top-level dataset document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDataset {
    #[serde(default)]
    pub features: BTreeMap<String, RawFeature>,
    #[serde(default)]
    pub groups: BTreeMap<String, RawGroup>,
}

impl RawDataset {
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if `json` is not a dataset document.
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        serde_json::from_str(json).map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFeature {
    /// `"moved"` or `"split"` for redirect entries, which carry no name.
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<RawStatus>,
    #[serde(default)]
    pub group: Option<OneOrMany>,
}

impl RawFeature {
    /// Baseline tier as written upstream: `"high"`, `"low"`, or `None` for `false`/missing.
    #[must_use]
    pub fn baseline_tier(&self) -> Option<&str> {
        match self.status.as_ref()?.baseline.as_ref()? {
            RawBaseline::Tier(tier) => Some(tier.as_str()),
            RawBaseline::Flag(_) => None,
        }
    }

    #[must_use]
    pub fn first_group(&self) -> Option<&str> {
        self.group.as_ref().and_then(OneOrMany::first)
    }

    /// `"browser: version"` pairs joined with `", "`, or `None` without a support table.
    #[must_use]
    pub fn support_summary(&self) -> Option<String> {
        let support = self.status.as_ref()?.support.as_ref()?;
        Some(
            support
                .iter()
                .map(|(browser, version)| format!("{browser}: {version}"))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStatus {
    #[serde(default)]
    pub baseline: Option<RawBaseline>,
    #[serde(default)]
    pub baseline_low_date: Option<String>,
    #[serde(default)]
    pub baseline_high_date: Option<String>,
    #[serde(default)]
    pub support: Option<BTreeMap<String, String>>,
}

/// `status.baseline` is either a tier string or `false`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawBaseline {
    Tier(String),
    Flag(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::One(value) => Some(value.as_str()),
            Self::Many(values) => values.first().map(String::as_str),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGroup {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dataset_shapes() {
        let dataset = RawDataset::from_json(fixtures::DATASET).unwrap();
        assert_eq!(dataset.features.len(), 6);
        assert_eq!(dataset.groups.len(), 3);

        let grid = &dataset.features["grid"];
        assert_eq!(grid.baseline_tier(), Some("high"));
        assert_eq!(grid.first_group(), Some("grid"));
        assert_eq!(
            grid.support_summary().as_deref(),
            Some("chrome: 57, firefox: 52, safari: 10.1")
        );

        let hint = &dataset.features["popover-hint"];
        assert_eq!(hint.baseline_tier(), None);
        assert_eq!(hint.first_group(), None);

        assert_eq!(dataset.features["has"].first_group(), Some("selectors"));
        assert!(dataset.features["legacy-name"].name.is_none());
        assert!(dataset.features["no-status"].support_summary().is_none());
    }

    #[test]
    fn invalid_dataset_is_a_serialization_error() {
        assert!(matches!(
            RawDataset::from_json("[1, 2]"),
            Err(StorageError::Serialization(_))
        ));
    }
}
