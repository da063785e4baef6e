use super::{DecodingStep, ReducedColumns, StepParameters, remaining_weight, subset_sums};
use crate::collision::hash_join;
use gf2::{BitMatrix, BitVec, Bitwise};
use std::ops::ControlFlow;

/// Finiasz–Sendrier variant of Stern's step.
///
/// The collision window is the `l` syndrome rows starting at `offset`, and the search region
/// is the information columns together with the identity columns of those rows. Matches
/// come from a hash join, so neither list is sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsIsdStep {
    p: usize,
    l: usize,
    offset: usize,
}

impl FsIsdStep {
    #[must_use]
    pub fn new(p: usize, l: usize, offset: usize) -> Self {
        Self { p, l, offset }
    }
}

impl DecodingStep for FsIsdStep {
    fn name(&self) -> &'static str {
        "fs-isd"
    }

    fn parameters(&self) -> StepParameters {
        StepParameters::FsIsd {
            p: self.p,
            l: self.l,
            offset: self.offset,
        }
    }

    /// # Panics
    ///
    /// Panics if `offset + l` exceeds the row count.
    fn search(&self, matrix: &BitMatrix, syndrome: &BitVec, weight: usize) -> Option<BitVec> {
        let rows = self.offset..self.offset + self.l;
        assert!(rows.end <= matrix.row_count(), "projection window exceeds the row count");
        let residual_weight = remaining_weight(weight, 2 * self.p)?;
        let columns = ReducedColumns::new(matrix);
        let information = columns.information;
        let region: Vec<usize> = (0..information)
            .chain(rows.clone().map(|row| information + row))
            .collect();
        let (left_half, right_half) = region.split_at(region.len() / 2);

        let window = matrix.transposed_rows(rows.clone());
        let target = syndrome.extract(rows.start, rows.end);
        let left = subset_sums(&window, left_half, self.p, None);
        let right = subset_sums(&window, right_half, self.p, Some(&target));

        hash_join(&left, &right, |left_entry, right_entry| {
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
