use rand::Rng;
use rand::seq::SliceRandom;

use baseline_core::model::{BaselineQuestion, Catalog, ComparisonQuestion, GameMode, Question};

/// Target number of questions per session.
pub const SESSION_LENGTH: usize = 10;

/// Questions selected for one session, plus how many candidates were available.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionPool {
    pub questions: Vec<Question>,
    pub comparison_candidates: usize,
    pub baseline_candidates: usize,
    pub target: usize,
}

impl QuestionPool {
    /// Total number of questions in this pool.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// How many questions short of the target the pool came up.
    #[must_use]
    pub fn shortfall(&self) -> usize {
        self.target.saturating_sub(self.questions.len())
    }

    #[must_use]
    pub fn comparison_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| matches!(q, Question::Comparison(_)))
            .count()
    }
}

/// Builds the question sequence for a session from the catalog.
pub struct PoolBuilder<'a> {
    catalog: &'a Catalog,
    mode: GameMode,
    length: usize,
}

impl<'a> PoolBuilder<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            mode: GameMode::default(),
            length: SESSION_LENGTH,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Override the target session length.
    #[must_use]
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Build the pool, drawing every random choice from `rng`.
    ///
    /// - Baseline mode: a random permutation of the catalog, truncated to the target length.
    /// - Mixed mode: consecutive pairs of the permuted catalog become comparison candidates
    ///   when their Chrome versions are defined and differ; even slots prefer a comparison,
    ///   odd slots a status question, each drawn without replacement.
    pub fn build<R: Rng + ?Sized>(self, rng: &mut R) -> QuestionPool {
        let mut shuffled = self.catalog.features().to_vec();
        shuffled.shuffle(rng);

        match self.mode {
            GameMode::Baseline => {
                let baseline_candidates = shuffled.len();
                let questions = shuffled
                    .into_iter()
                    .take(self.length)
                    .map(|f| Question::from(BaselineQuestion::new(f)))
                    .collect();
                QuestionPool {
                    questions,
                    comparison_candidates: 0,
                    baseline_candidates,
                    target: self.length,
                }
            }
            GameMode::Mixed => {
                let mut comparisons: Vec<Question> = shuffled
                    .chunks_exact(2)
                    .filter_map(|pair| ComparisonQuestion::pair(pair[0].clone(), pair[1].clone()))
                    .map(Question::from)
                    .collect();
                let mut baselines: Vec<Question> = shuffled
                    .into_iter()
                    .map(|f| Question::from(BaselineQuestion::new(f)))
                    .collect();
                let comparison_candidates = comparisons.len();
                let baseline_candidates = baselines.len();

                let mut questions = Vec::with_capacity(self.length);
                for slot in 0..self.length {
                    let (preferred, fallback) = if slot % 2 == 0 {
                        (&mut comparisons, &mut baselines)
                    } else {
                        (&mut baselines, &mut comparisons)
                    };
                    let pick = match take_random(preferred, &mut *rng) {
                        Some(question) => Some(question),
                        None => take_random(fallback, &mut *rng),
                    };
                    let Some(question) = pick else {
                        break;
                    };
                    questions.push(question);
                }

                QuestionPool {
                    questions,
                    comparison_candidates,
                    baseline_candidates,
                    target: self.length,
                }
            }
        }
    }
}

fn take_random<T, R: Rng + ?Sized>(pool: &mut Vec<T>, rng: &mut R) -> Option<T> {
    if pool.is_empty() {
        return None;
    }
    let index = rng.random_range(0..pool.len());
    Some(pool.remove(index))
}
