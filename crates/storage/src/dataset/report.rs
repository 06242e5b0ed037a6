use std::collections::BTreeMap;
use std::fmt;

use super::{RawDataset, RawFeature};

const NO_STATUS: &str = "no-status";

/// One representative feature for a baseline tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusExample {
    pub status: String,
    pub name: String,
    pub description: String,
    pub low_date: Option<String>,
    pub high_date: Option<String>,
    pub support: Option<String>,
}

/// Summary of a raw dataset, used to sanity-check it before generating a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetReport {
    pub total: usize,
    /// Keyed by `high`, `low`, or `no-status` (which includes `baseline: false`).
    pub distribution: BTreeMap<String, usize>,
    pub examples: Vec<StatusExample>,
    /// `(key, display name)` pairs.
    pub groups: Vec<(String, String)>,
}

impl DatasetReport {
    #[must_use]
    pub fn from_dataset(dataset: &RawDataset) -> Self {
        let mut distribution = BTreeMap::new();
        for feature in dataset.features.values() {
            *distribution.entry(tier_key(feature).to_string()).or_insert(0) += 1;
        }

        let examples = ["high", "low", NO_STATUS]
            .into_iter()
            .filter_map(|tier| {
                dataset
                    .features
                    .values()
                    .find(|f| f.name.is_some() && tier_key(f) == tier)
                    .map(|f| example(tier, f))
            })
            .collect();

        let groups = dataset
            .groups
            .iter()
            .map(|(key, group)| (key.clone(), group.name.clone()))
            .collect();

        Self {
            total: dataset.features.len(),
            distribution,
            examples,
            groups,
        }
    }
}

fn tier_key(feature: &RawFeature) -> &str {
    feature.baseline_tier().unwrap_or(NO_STATUS)
}

fn example(tier: &str, feature: &RawFeature) -> StatusExample {
    let status = feature.status.as_ref();
    StatusExample {
        status: tier.to_string(),
        name: feature.name.clone().unwrap_or_default(),
        description: feature.description.clone().unwrap_or_default(),
        low_date: status.and_then(|s| s.baseline_low_date.clone()),
        high_date: status.and_then(|s| s.baseline_high_date.clone()),
        support: feature.support_summary(),
    }
}

impl fmt::Display for DatasetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Web Features Analysis:")?;
        writeln!(f, "===================")?;
        writeln!(f, "Total features: {}", self.total)?;

        writeln!(f, "\nStatus distribution:")?;
        for (status, count) in &self.distribution {
            writeln!(f, "  {status}: {count}")?;
        }

        writeln!(f, "\nExamples of each status:")?;
        for example in &self.examples {
            writeln!(f, "\n{} ({}):", example.status.to_uppercase(), example.name)?;
            writeln!(f, "  Description: {}", example.description)?;
            writeln!(
                f,
                "  Dates: low={}, high={}",
                example.low_date.as_deref().unwrap_or("-"),
                example.high_date.as_deref().unwrap_or("-")
            )?;
            if let Some(support) = &example.support {
                writeln!(f, "  Support: {support}")?;
            }
        }

        writeln!(f, "\nAvailable groups:")?;
        for (key, name) in &self.groups {
            writeln!(f, "  {key}: {name}")?;
        }
        Ok(())
    }
}
