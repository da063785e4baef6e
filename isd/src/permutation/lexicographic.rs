use super::{Permutation, PermutationCursor};

/// All permutations of `0..n` in lexicographic order, starting at the identity.
///
/// ```
/// use isd::PermutationCursor;
/// use isd::permutation::LexicographicPermutation;
///
/// let mut cursor = LexicographicPermutation::new(3);
/// cursor.advance();
/// assert_eq!(cursor.current().as_slice(), &[0, 2, 1]);
/// cursor.advance();
/// assert_eq!(cursor.current().as_slice(), &[1, 0, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct LexicographicPermutation {
    current: Permutation,
    exhausted: bool,
}

impl LexicographicPermutation {
    #[must_use]
    pub fn new(length: usize) -> Self {
        Self {
            current: Permutation::identity(length),
            exhausted: false,
        }
    }
}

/// Rearranges `values` into the next larger permutation; `false` once it is the largest.
fn next_permutation(values: &mut [usize]) -> bool {
    let Some(pivot) = values.windows(2).rposition(|pair| pair[0] < pair[1]) else {
        return false;
    };
    let Some(successor) = values.iter().rposition(|&value| value > values[pivot]) else {
        return false;
    };
    values.swap(pivot, successor);
    values[pivot + 1..].reverse();
    true
}

impl PermutationCursor for LexicographicPermutation {
    fn has_next(&self) -> bool {
        !self.exhausted
    }

    fn current(&self) -> &Permutation {
        &self.current
    }

    fn advance(&mut self) {
        if !self.exhausted && !next_permutation(self.current.as_mut_slice()) {
            self.exhausted = true;
        }
    }
}
