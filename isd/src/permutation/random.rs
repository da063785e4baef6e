use super::{Permutation, PermutationCursor};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

/// Endless source of uniformly random permutations, starting at the identity.
#[derive(Debug, Clone)]
pub struct RandomPermutation {
    current: Permutation,
    random_number_generator: SmallRng,
}

impl RandomPermutation {
    /// Seeded from operating-system entropy.
    #[must_use]
    pub fn new(length: usize) -> Self {
        Self::with_rng(length, SmallRng::from_entropy())
    }

    #[must_use]
    pub fn with_seed(length: usize, seed: u64) -> Self {
        Self::with_rng(length, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(length: usize, random_number_generator: SmallRng) -> Self {
        Self {
            current: Permutation::identity(length),
            random_number_generator,
        }
    }
}

impl PermutationCursor for RandomPermutation {
    fn has_next(&self) -> bool {
        true
    }

    fn current(&self) -> &Permutation {
        &self.current
    }

    fn advance(&mut self) {
        self.current
            .as_mut_slice()
            .shuffle(&mut self.random_number_generator);
    }
}
