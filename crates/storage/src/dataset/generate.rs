use rand::Rng;
use rand::seq::SliceRandom;

use baseline_core::model::{BaselineStatus, FeatureId, FeatureItem};

use super::{RawDataset, RawFeature};

/// Features with shorter descriptions make poor questions and are skipped.
pub const MIN_DESCRIPTION_LEN: usize = 10;

const DEFAULT_GROUP: &str = "other";

/// Per-status caps for the generated catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub max_high: usize,
    pub max_low: usize,
    pub max_unknown: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_high: 100,
            max_low: 50,
            max_unknown: 50,
        }
    }
}

impl GeneratorConfig {
    #[must_use]
    pub fn cap(&self, status: BaselineStatus) -> usize {
        match status {
            BaselineStatus::High => self.max_high,
            BaselineStatus::Low => self.max_low,
            BaselineStatus::Unknown => self.max_unknown,
        }
    }
}

/// Output of a generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCatalog {
    pub features: Vec<FeatureItem>,
    pub high: usize,
    pub low: usize,
    pub unknown: usize,
}

impl GeneratedCatalog {
    #[must_use]
    pub fn total(&self) -> usize {
        self.features.len()
    }
}

/// Convert every quiz-eligible dataset entry into a catalog feature.
///
/// Entries without a name, or with a description shorter than
/// [`MIN_DESCRIPTION_LEN`] characters, are skipped.
#[must_use]
pub fn eligible_features(dataset: &RawDataset) -> Vec<FeatureItem> {
    dataset
        .features
        .iter()
        .filter_map(|(key, raw)| to_feature(key, raw))
        .collect()
}

fn to_feature(key: &str, raw: &RawFeature) -> Option<FeatureItem> {
    let name = raw.name.as_deref()?.trim();
    let description = raw.description.as_deref()?.trim();
    if name.is_empty() || description.chars().count() < MIN_DESCRIPTION_LEN {
        return None;
    }

    let status = match raw.baseline_tier() {
        Some("high") => BaselineStatus::High,
        Some("low") => BaselineStatus::Low,
        _ => BaselineStatus::Unknown,
    };

    let item = FeatureItem::new(FeatureId::new(key), name, description, status)
        .ok()?
        .with_group(raw.first_group().unwrap_or(DEFAULT_GROUP));

    Some(match raw.support_summary() {
        Some(support) => item.with_support_info(support),
        None => item,
    })
}

/// Shuffle the eligible features and keep a balanced mix per status.
///
/// Output order is all high features, then low, then unknown.
pub fn generate<R: Rng + ?Sized>(
    dataset: &RawDataset,
    config: GeneratorConfig,
    rng: &mut R,
) -> GeneratedCatalog {
    let mut shuffled = eligible_features(dataset);
    shuffled.shuffle(rng);

    let mut features = Vec::new();
    let mut counts = [0_usize; 3];
    for (slot, status) in BaselineStatus::ALL.into_iter().enumerate() {
        let picked: Vec<FeatureItem> = shuffled
            .iter()
            .filter(|f| f.status() == status)
            .take(config.cap(status))
            .cloned()
            .collect();
        counts[slot] = picked.len();
        features.extend(picked);
    }

    tracing::info!(
        total = features.len(),
        high = counts[0],
        low = counts[1],
        unknown = counts[2],
        "generated catalog"
    );

    GeneratedCatalog {
        features,
        high: counts[0],
        low: counts[1],
        unknown: counts[2],
    }
}
