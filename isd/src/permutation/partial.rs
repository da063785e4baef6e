use super::{Permutation, PermutationCursor};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use std::ops::Range;

/// Random permutations that mostly reshuffle a fixed window of positions.
///
/// Draw 0 is the identity. Every `window.len()`-th draw after that reshuffles the whole
/// permutation; every other draw reshuffles only the entries inside `window`, which
/// [`changed_range`](PermutationCursor::changed_range) reports.
#[derive(Debug, Clone)]
pub struct PartialPermutation {
    current: Permutation,
    window: Range<usize>,
    draws: usize,
    random_number_generator: SmallRng,
}

impl PartialPermutation {
    /// # Panics
    ///
    /// Panics if `window` is empty or does not fit in `0..length`.
    #[must_use]
    pub fn new(length: usize, window: Range<usize>) -> Self {
        Self::with_rng(length, window, SmallRng::from_entropy())
    }

    /// # Panics
    ///
    /// Panics if `window` is empty or does not fit in `0..length`.
    #[must_use]
    pub fn with_seed(length: usize, window: Range<usize>, seed: u64) -> Self {
        Self::with_rng(length, window, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(length: usize, window: Range<usize>, random_number_generator: SmallRng) -> Self {
        assert!(
            !window.is_empty() && window.end <= length,
            "window {window:?} must be a non-empty part of 0..{length}"
        );
        Self {
            current: Permutation::identity(length),
            window,
            draws: 0,
            random_number_generator,
        }
    }

    #[must_use]
    pub fn window(&self) -> Range<usize> {
        self.window.clone()
    }

    fn is_full_draw(&self) -> bool {
        self.draws % self.window.len() == 0
    }
}

impl PermutationCursor for PartialPermutation {
    fn has_next(&self) -> bool {
        true
    }

    fn current(&self) -> &Permutation {
        &self.current
    }

    fn advance(&mut self) {
        self.draws += 1;
        let shuffled = if self.is_full_draw() {
            0..self.current.len()
        } else {
            self.window.clone()
        };
        self.current.as_mut_slice()[shuffled].shuffle(&mut self.random_number_generator);
    }

    fn changed_range(&self) -> Option<Range<usize>> {
        (!self.is_full_draw()).then(|| self.window.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_window_moves_between_full_draws() {
        let mut cursor = PartialPermutation::with_seed(20, 12..16, 5);
        assert_eq!(cursor.changed_range(), None);
        let base = cursor.current().clone();
        for _ in 1..4 {
            cursor.advance();
            assert_eq!(cursor.changed_range(), Some(12..16));
            assert_eq!(cursor.current()[..12], base[..12]);
            assert_eq!(cursor.current()[16..], base[16..]);
            assert!(cursor.current().is_bijection());
        }
        cursor.advance();
        assert_eq!(cursor.changed_range(), None);
    }
}
