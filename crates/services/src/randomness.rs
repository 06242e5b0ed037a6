use rand::SeedableRng;
use rand::rngs::StdRng;

/// Source of randomness for shuffling and sampling questions.
///
/// Production uses entropy; tests and reproducible runs pin a seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Randomness {
    #[default]
    Entropy,
    Seeded(u64),
}

impl Randomness {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(seed)
    }

    /// Build a generator for this source.
    #[must_use]
    pub fn rng(&self) -> StdRng {
        match self {
            Randomness::Entropy => StdRng::from_rng(&mut rand::rng()),
            Randomness::Seeded(seed) => StdRng::seed_from_u64(*seed),
        }
    }

    #[must_use]
    pub fn is_seeded(&self) -> bool {
        matches!(self, Randomness::Seeded(_))
    }
}
