//! Uniform random permutation of tier contents.

use clubfeed_core::Shuffler;
use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;

/// [`Shuffler`] backed by a Fisher–Yates shuffle over `R`.
///
/// Every permutation of the input is equally likely. Build one per request;
/// the generator is owned, never shared between concurrent browses.
///
/// # Examples
/// ```
/// use clubfeed_core::Shuffler;
/// use clubfeed_ranker::RandomShuffler;
///
/// let first = RandomShuffler::seeded(11).shuffle((0..8).collect::<Vec<_>>());
/// let second = RandomShuffler::seeded(11).shuffle((0..8).collect::<Vec<_>>());
/// assert_eq!(first, second);
/// ```
#[derive(Debug, Clone)]
pub struct RandomShuffler<R = ChaCha8Rng> {
    rng: R,
}

impl<R: Rng> RandomShuffler<R> {
    /// Wrap an existing generator.
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomShuffler<ChaCha8Rng> {
    /// Deterministic shuffler; the same seed yields the same permutations.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Shuffler seeded from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> Shuffler for RandomShuffler<R> {
    fn shuffle<T>(&mut self, mut items: Vec<T>) -> Vec<T> {
        items.shuffle(&mut self.rng);
        items
    }
}
