//! Sources of column permutations for the decoding drivers.
//!
//! A source is a cursor: [`current`](PermutationCursor::current) is valid while
//! [`has_next`](PermutationCursor::has_next) holds, and [`advance`](PermutationCursor::advance)
//! moves to the next permutation. Random sources never run out.

mod lexicographic;
mod partial;
mod random;

pub use lexicographic::LexicographicPermutation;
pub use partial::PartialPermutation;
pub use random::RandomPermutation;

use derive_more::{Deref, From, Into};
use std::ops::Range;

/// A bijection on `0..len()`; entry `i` names the source column placed at position `i`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, From, Into)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    #[must_use]
    pub fn identity(length: usize) -> Self {
        Self((0..length).collect())
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// `true` when every index in `0..len()` appears exactly once.
    #[must_use]
    pub fn is_bijection(&self) -> bool {
        let mut seen = vec![false; self.0.len()];
        self.0
            .iter()
            .all(|&index| index < seen.len() && !std::mem::replace(&mut seen[index], true))
    }

    /// ```
    /// use isd::Permutation;
    ///
    /// let permutation = Permutation::from(vec![2, 0, 1]);
    /// assert_eq!(permutation.inverse().as_slice(), &[1, 2, 0]);
    /// ```
    #[must_use]
    pub fn inverse(&self) -> Self {
        let mut inverse = vec![0; self.0.len()];
        for (position, &source) in self.0.iter().enumerate() {
            inverse[source] = position;
        }
        Self(inverse)
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [usize] {
        &mut self.0
    }
}

pub trait PermutationCursor {
    fn has_next(&self) -> bool;
    fn current(&self) -> &Permutation;
    fn advance(&mut self);

    /// Positions in which [`current`](PermutationCursor::current) may differ from the last
    /// permutation for which this returned `None`.
    ///
    /// `None` means the whole permutation is new.
    fn changed_range(&self) -> Option<Range<usize>> {
        None
    }
}

impl<Cursor: PermutationCursor + ?Sized> PermutationCursor for Box<Cursor> {
    fn has_next(&self) -> bool {
        (**self).has_next()
    }

    fn current(&self) -> &Permutation {
        (**self).current()
    }

    fn advance(&mut self) {
        (**self).advance();
    }

    fn changed_range(&self) -> Option<Range<usize>> {
        (**self).changed_range()
    }
}
