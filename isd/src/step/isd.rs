use super::{DecodingStep, ReducedColumns, StepParameters, remaining_weight};
use crate::combination::Combination;
use gf2::{BitMatrix, BitVec, Bitwise};

/// Plain information-set decoding: try every `p`-subset of the information columns and
/// accept when the leftover syndrome has weight `ω - p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsdStep {
    p: usize,
}

impl IsdStep {
    #[must_use]
    pub fn new(p: usize) -> Self {
        Self { p }
    }
}

impl DecodingStep for IsdStep {
    fn name(&self) -> &'static str {
        "isd"
    }

    fn parameters(&self) -> StepParameters {
        StepParameters::Isd { p: self.p }
    }

    fn search(&self, matrix: &BitMatrix, syndrome: &BitVec, weight: usize) -> Option<BitVec> {
        let residual_weight = remaining_weight(weight, self.p)?;
        let columns = ReducedColumns::new(matrix);
        let mut subsets = Combination::new(columns.information, self.p);
        while subsets.has_next() {
            let residual = columns.residual(syndrome, subsets.current());
            if residual.weight() == residual_weight {
                return Some(columns.error_vector(subsets.current(), &residual));
            }
            subsets.advance();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::fixtures::systematic_instance;

    #[test]
    fn finds_error_split_between_information_and_identity() {
        let (matrix, syndrome) = systematic_instance(12, 24, &[3, 17, 20], 11);
        let error = IsdStep::new(1).search(&matrix, &syndrome, 3).unwrap();
        assert_eq!(error.weight(), 3);
        assert_eq!(&matrix * &error, syndrome);
    }

    #[test]
    fn zero_p_is_a_syndrome_weight_check() {
        let (matrix, syndrome) = systematic_instance(12, 24, &[13, 20], 2);
        let error = IsdStep::new(0).search(&matrix, &syndrome, 2).unwrap();
        assert_eq!(error.support().collect::<Vec<_>>(), vec![13, 20]);
        assert_eq!(IsdStep::new(0).search(&matrix, &syndrome, 3), None);
    }

    #[test]
    fn weight_below_p_finds_nothing() {
        let (matrix, syndrome) = systematic_instance(6, 12, &[1], 4);
        assert_eq!(IsdStep::new(2).search(&matrix, &syndrome, 1), None);
    }
}
