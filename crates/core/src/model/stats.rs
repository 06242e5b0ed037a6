use serde::Serialize;

use crate::model::answer::AnswerRecord;
use crate::model::feature::BaselineStatus;
use crate::model::question::Question;

/// Correct/total pair for one status bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub correct: u32,
    pub total: u32,
}

/// Per-status results for a session.
///
/// `total` counts questions of a status as they are shown, `correct` counts
/// correct answers to them. Comparison questions are not attributed to any
/// bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    high: Tally,
    low: Tally,
    unknown: Tally,
}

impl CategoryStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the counters from the questions shown so far and the answers given.
    #[must_use]
    pub fn recompute(shown: &[Question], answers: &[AnswerRecord]) -> Self {
        let mut stats = Self::new();
        for status in shown.iter().filter_map(Question::baseline_status) {
            stats.record_shown(status);
        }
        for answer in answers.iter().filter(|a| a.is_correct) {
            if let Some(status) = answer.question.baseline_status() {
                stats.record_correct(status);
            }
        }
        stats
    }

    pub fn record_shown(&mut self, status: BaselineStatus) {
        let tally = self.tally_mut(status);
        tally.total = tally.total.saturating_add(1);
    }

    pub fn record_correct(&mut self, status: BaselineStatus) {
        let tally = self.tally_mut(status);
        tally.correct = tally.correct.saturating_add(1);
    }

    #[must_use]
    pub fn get(&self, status: BaselineStatus) -> Tally {
        match status {
            BaselineStatus::High => self.high,
            BaselineStatus::Low => self.low,
            BaselineStatus::Unknown => self.unknown,
        }
    }

    /// Buckets in display order.
    pub fn iter(&self) -> impl Iterator<Item = (BaselineStatus, Tally)> + '_ {
        BaselineStatus::ALL
            .into_iter()
            .map(move |status| (status, self.get(status)))
    }

    /// Sum of `total` over all buckets.
    #[must_use]
    pub fn total_shown(&self) -> u32 {
        self.high.total + self.low.total + self.unknown.total
    }

    #[must_use]
    pub fn total_correct(&self) -> u32 {
        self.high.correct + self.low.correct + self.unknown.correct
    }

    fn tally_mut(&mut self, status: BaselineStatus) -> &mut Tally {
        match status {
            BaselineStatus::High => &mut self.high,
            BaselineStatus::Low => &mut self.low,
            BaselineStatus::Unknown => &mut self.unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BaselineQuestion, ComparisonQuestion, FeatureId, FeatureItem};

    fn baseline(status: BaselineStatus) -> Question {
        let feature = FeatureItem::new(FeatureId::new("f"), "F", "desc", status).unwrap();
        BaselineQuestion::new(feature).into()
    }

    fn comparison() -> Question {
        let a = FeatureItem::new(FeatureId::new("a"), "A", "desc", BaselineStatus::High)
            .unwrap()
            .with_support_info("chrome: 10");
        let b = FeatureItem::new(FeatureId::new("b"), "B", "desc", BaselineStatus::Low)
            .unwrap()
            .with_support_info("chrome: 20");
        ComparisonQuestion::pair(a, b).unwrap().into()
    }

    #[test]
    fn recompute_counts_shown_and_correct() {
        let shown = vec![
            baseline(BaselineStatus::High),
            comparison(),
            baseline(BaselineStatus::Low),
        ];
        let answers = vec![
            AnswerRecord::grade(shown[0].clone(), BaselineStatus::High.into()),
            AnswerRecord::grade(shown[1].clone(), crate::model::Side::B.into()),
        ];

        let stats = CategoryStats::recompute(&shown, &answers);

        assert_eq!(stats.get(BaselineStatus::High), Tally { correct: 1, total: 1 });
        assert_eq!(stats.get(BaselineStatus::Low), Tally { correct: 0, total: 1 });
        assert_eq!(stats.total_shown(), 2);
        // the correct comparison answer is not attributed to a bucket
        assert_eq!(stats.total_correct(), 1);
    }

    #[test]
    fn iter_is_in_display_order() {
        let statuses: Vec<_> = CategoryStats::new().iter().map(|(s, _)| s).collect();
        assert_eq!(statuses, BaselineStatus::ALL.to_vec());
    }
}
