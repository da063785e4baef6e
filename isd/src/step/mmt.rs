use super::{DecodingStep, ReducedColumns, StepParameters, subset_sums};
use crate::collision::{CollisionEntry, JoinStrategy};
use crate::combination::number_of_combinations;
use gf2::{BitMatrix, BitVec, Bitwise, BitwisePairMut, IndexSet};
use std::ops::ControlFlow;

/// The two-level May–Meurer–Thomae step.
///
/// Sums of `p` columns from either half of the search region are first matched on the
/// `l2` syndrome rows after the first `l1`. Every colliding pair becomes a level-1 entry: its
/// column set, keyed by the sum over the first `l1` rows. One level-1 list targets zero on
/// the `l2` rows, the other targets the syndrome there. A final match on the `l1` rows
/// combines one entry of each list; columns chosen by both cancel out.
///
/// Level-1 lists are cut off at `list_cap` entries, taken in join order: lowest level-2 keys
/// first under [`JoinStrategy::SortMerge`], right-list order under [`JoinStrategy::Hash`].
/// A cut-off list can miss a solution for the current permutation; the cap trades that
/// recall for memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MmtStep {
    p: usize,
    l1: usize,
    l2: usize,
    list_cap: usize,
    join: JoinStrategy,
}

impl MmtStep {
    /// A step matching its lists with [`JoinStrategy::SortMerge`].
    #[must_use]
    pub fn new(p: usize, l1: usize, l2: usize, list_cap: usize) -> Self {
        Self::with_join(p, l1, l2, list_cap, JoinStrategy::SortMerge)
    }

    #[must_use]
    pub fn with_join(p: usize, l1: usize, l2: usize, list_cap: usize, join: JoinStrategy) -> Self {
        Self {
            p,
            l1,
            l2,
            list_cap: list_cap.max(1),
            join,
        }
    }

    /// `slack` times the expected number of level-2 collisions between two lists of
    /// `C(half, p)` random `l2`-bit keys, clamped to `1..=max_list`.
    ///
    /// ```
    /// use isd::step::MmtStep;
    ///
    /// assert_eq!(MmtStep::expected_list_cap(7, 1, 1, 4.0, 1_000_000), 98);
    /// assert_eq!(MmtStep::expected_list_cap(7, 1, 1, 4.0, 10), 10);
    /// assert_eq!(MmtStep::expected_list_cap(7, 1, 20, 4.0, 10), 1);
    /// ```
    #[must_use]
    pub fn expected_list_cap(half: usize, p: usize, l2: usize, slack: f64, max_list: usize) -> usize {
        let list_length = number_of_combinations(half, p) as f64;
        let key_space = 2f64.powi(i32::try_from(l2).unwrap_or(i32::MAX));
        let expected = (slack * list_length * list_length / key_space).ceil();
        if expected >= max_list as f64 {
            max_list
        } else {
            (expected as usize).max(1)
        }
    }

    /// Level-1 list from the level-2 lists; keys are `l1`-row sums plus `target`.
    fn level_one(
        &self,
        left: &mut [CollisionEntry],
        right: &mut [CollisionEntry],
        window: &BitMatrix,
        target: &BitVec,
    ) -> Vec<CollisionEntry<IndexSet>> {
        let mut list = Vec::new();
        let truncated = self.join.join(left, right, |left_entry, right_entry| {
            if list.len() == self.list_cap {
                return ControlFlow::Break(());
            }
            let indexes: IndexSet = left_entry
                .indexes
                .iter()
                .chain(&right_entry.indexes)
                .copied()
                .collect();
            let mut key = window.sum_of_rows(indexes.as_slice());
            BitwisePairMut::bitxor_assign(&mut key, target);
            list.push(CollisionEntry::new(key, indexes));
            ControlFlow::Continue(())
        });
        if truncated.is_some() {
            log::trace!("mmt level-1 list truncated at {} entries", self.list_cap);
        }
        list
    }
}

impl DecodingStep for MmtStep {
    fn name(&self) -> &'static str {
        "mmt"
    }

    fn parameters(&self) -> StepParameters {
        StepParameters::Mmt {
            p: self.p,
            l1: self.l1,
            l2: self.l2,
            list_cap: self.list_cap,
            join: self.join,
        }
    }

    /// # Panics
    ///
    /// Panics if `l1 + l2` exceeds the row count.
    fn search(&self, matrix: &BitMatrix, syndrome: &BitVec, weight: usize) -> Option<BitVec> {
        let l = self.l1 + self.l2;
        assert!(l <= matrix.row_count(), "projection window exceeds the row count");
        let columns = ReducedColumns::new(matrix);
        let region: Vec<usize> = (0..columns.information + l).collect();
        let (left_half, right_half) = region.split_at(region.len() / 2);

        let level_one_window = matrix.transposed_rows(0..self.l1);
        let level_two_window = matrix.transposed_rows(self.l1..l);
        let level_one_target = syndrome.extract(0, self.l1);
        let level_two_target = syndrome.extract(self.l1, l);

        let mut left = subset_sums(&level_two_window, left_half, self.p, None);
        let mut right = subset_sums(&level_two_window, right_half, self.p, None);
        let mut right_shifted = subset_sums(&level_two_window, right_half, self.p, Some(&level_two_target));

        let zero = BitVec::zeros(self.l1);
        let mut to_zero = self.level_one(&mut left, &mut right, &level_one_window, &zero);
        let mut to_syndrome = self.level_one(&mut left, &mut right_shifted, &level_one_window, &level_one_target);

        self.join.join(&mut to_zero, &mut to_syndrome, |zero_entry, syndrome_entry| {
            let combined = zero_entry.indexes.symmetric_difference(&syndrome_entry.indexes);
            let Some(residual_weight) = weight.checked_sub(combined.len()) else {
                return ControlFlow::Continue(());
            };
            let residual = columns.residual(syndrome, combined.as_slice());
            if residual.weight() == residual_weight {
                ControlFlow::Break(columns.error_vector(combined.as_slice(), &residual))
            } else {
                ControlFlow::Continue(())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::fixtures::systematic_instance;

    fn planted_collision() -> (BitMatrix, BitVec) {
        let (mut matrix, syndrome) = systematic_instance(12, 24, &[8, 11], 21);
        let bit = matrix.get((1, 8));
        matrix.set((1, 0), bit);
        (matrix, syndrome)
    }

    #[test]
    fn finds_errors_in_one_half() {
        let (matrix, syndrome) = planted_collision();
        for join in [JoinStrategy::SortMerge, JoinStrategy::Hash] {
            let error = MmtStep::with_join(1, 1, 1, 98, join).search(&matrix, &syndrome, 2).unwrap();
            assert_eq!(error.weight(), 2, "{join}");
            assert_eq!(&matrix * &error, syndrome, "{join}");
        }
    }

    #[test]
    fn combined_columns_reproduce_the_projected_syndrome() {
        let (matrix, syndrome) = planted_collision();
        let error = MmtStep::new(1, 1, 1, 98).search(&matrix, &syndrome, 2).unwrap();
        let region: Vec<usize> = error.support().filter(|&column| column < 14).collect();
        assert_eq!(matrix.sum_of_columns(&region, 0..2), syndrome.extract(0, 2));
    }

    #[test]
    fn truncated_lists_only_return_solutions() {
        let (matrix, syndrome) = planted_collision();
        if let Some(error) = MmtStep::new(1, 1, 1, 1).search(&matrix, &syndrome, 2) {
            assert_eq!(&matrix * &error, syndrome);
        }
    }
}
