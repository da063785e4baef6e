use super::{DecodingStep, ReducedColumns, StepParameters, remaining_weight, subset_sums};
use crate::collision::JoinStrategy;
use gf2::{BitMatrix, BitVec, Bitwise};
use std::ops::ControlFlow;

/// Stern's meet-in-the-middle step.
///
/// The information columns plus the identity columns of the first `l` rows are split into
/// two halves. Sums of `p` columns from each half are matched on their projection onto the
/// first `l` syndrome rows, so only colliding pairs get a full weight check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SternStep {
    p: usize,
    l: usize,
    join: JoinStrategy,
}

impl SternStep {
    /// A step matching its lists with [`JoinStrategy::SortMerge`].
    #[must_use]
    pub fn new(p: usize, l: usize) -> Self {
        Self::with_join(p, l, JoinStrategy::SortMerge)
    }

    #[must_use]
    pub fn with_join(p: usize, l: usize, join: JoinStrategy) -> Self {
        Self { p, l, join }
    }
}

impl DecodingStep for SternStep {
    fn name(&self) -> &'static str {
        "stern"
    }

    fn parameters(&self) -> StepParameters {
        StepParameters::Stern {
            p: self.p,
            l: self.l,
            join: self.join,
        }
    }

    /// # Panics
    ///
    /// Panics if `l` exceeds the row count.
    fn search(&self, matrix: &BitMatrix, syndrome: &BitVec, weight: usize) -> Option<BitVec> {
        assert!(self.l <= matrix.row_count(), "projection window exceeds the row count");
        let residual_weight = remaining_weight(weight, 2 * self.p)?;
        let columns = ReducedColumns::new(matrix);
        let region: Vec<usize> = (0..columns.information + self.l).collect();
        let (left_half, right_half) = region.split_at(region.len() / 2);

        let window = matrix.transposed_rows(0..self.l);
        let target = syndrome.extract(0, self.l);
        let mut left = subset_sums(&window, left_half, self.p, None);
        let mut right = subset_sums(&window, right_half, self.p, Some(&target));

        self.join.join(&mut left, &mut right, |left_entry, right_entry| {
            let guessed = left_entry.indexes.iter().chain(&right_entry.indexes);
            let residual = columns.residual(syndrome, guessed.clone());
            if residual.weight() == residual_weight {
                ControlFlow::Break(columns.error_vector(guessed, &residual))
            } else {
                ControlFlow::Continue(())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::IsdStep;
    use crate::step::fixtures::systematic_instance;

    #[test]
    fn finds_one_error_in_each_half() {
        let (matrix, syndrome) = systematic_instance(12, 24, &[2, 9, 21], 8);
        for join in [JoinStrategy::SortMerge, JoinStrategy::Hash] {
            let error = SternStep::with_join(1, 1, join).search(&matrix, &syndrome, 3).unwrap();
            assert_eq!(error.weight(), 3, "{join}");
            assert_eq!(&matrix * &error, syndrome, "{join}");
        }
    }

    #[test]
    fn every_match_is_a_solution() {
        let (matrix, syndrome) = systematic_instance(12, 24, &[0, 1], 8);
        let found = SternStep::new(1, 2).search(&matrix, &syndrome, 2);
        if let Some(error) = found {
            assert_eq!(&matrix * &error, syndrome);
        }
    }

    #[test]
    fn zero_p_matches_the_weight_check_on_a_clean_window() {
        let (matrix, syndrome) = systematic_instance(10, 20, &[15, 18], 1);
        assert!(syndrome.extract(0, 3).is_zero());
        let stern = SternStep::new(0, 3).search(&matrix, &syndrome, 2);
        let isd = IsdStep::new(0).search(&matrix, &syndrome, 2);
        assert_eq!(stern, isd);
        assert!(stern.is_some());
        assert_eq!(SternStep::new(0, 3).search(&matrix, &syndrome, 1), None);
    }
}
