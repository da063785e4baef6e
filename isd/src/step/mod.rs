//! Searches run once per permutation on a reduced check matrix.
//!
//! After [`gauss_elimination`] the check matrix reads `[A | I]`: the first `k = n - rows`
//! columns carry information, column `k + r` is the unit vector of row `r`. A step guesses
//! the part of the error that falls into the information columns (and, for the
//! meet-in-the-middle steps, a window of `l` identity columns); the remaining syndrome
//! then spells out the rest of the error in the identity part.

mod fs_isd;
mod isd;
mod mmt;
mod stern;

pub use fs_isd::FsIsdStep;
pub use isd::IsdStep;
pub use mmt::MmtStep;
pub use stern::SternStep;

use crate::collision::{CollisionEntry, JoinStrategy};
use crate::combination::{Combination, number_of_combinations};
use crate::config::ParameterConfig;
use crate::error::{DecodeError, UnknownAlgorithm};
use crate::gauss::gauss_elimination;
use gf2::{BitMatrix, BitVec, Bitwise, BitwiseMut, BitwisePairMut};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One decision procedure of an information-set decoder.
pub trait DecodingStep {
    fn name(&self) -> &'static str;

    /// The resolved parameters, for logs and reports.
    fn parameters(&self) -> StepParameters;

    /// Brings a permuted check matrix into the `[A | I]` form [`search`](DecodingStep::search)
    /// expects; `false` when the permutation has to be skipped.
    fn reduce(&self, matrix: &mut BitMatrix, syndrome: &mut BitVec) -> bool {
        gauss_elimination(matrix, syndrome)
    }

    /// Looks for an error vector of the given weight in the column order of `matrix`.
    ///
    /// Any returned vector has length `matrix.column_count()`, weight `weight` and satisfies
    /// `matrix · e = syndrome`.
    fn search(&self, matrix: &BitMatrix, syndrome: &BitVec, weight: usize) -> Option<BitVec>;

    /// Checks that the projection windows fit a check matrix with `rows` rows.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Parameters`] naming the window that does not fit.
    fn check_fits(&self, rows: usize) -> Result<(), DecodeError> {
        let (window_end, what) = match self.parameters() {
            StepParameters::Isd { .. } => return Ok(()),
            StepParameters::Stern { l, .. } => (l, format!("l = {l}")),
            StepParameters::Mmt { l1, l2, .. } => (l1 + l2, format!("l1 + l2 = {}", l1 + l2)),
            StepParameters::FsIsd { l, offset, .. } => (offset + l, format!("offset + l = {}", offset + l)),
        };
        if window_end > rows {
            return Err(DecodeError::Parameters {
                algorithm: self.name(),
                rows,
                reason: format!("{what} exceeds the row count"),
            });
        }
        Ok(())
    }

    /// Checks that an error of `weight` can pass the step's weight test at all.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Parameters`] when `weight` is below the number of columns the
    /// step guesses per match: `p` for ISD, `2p` for Stern and FS-ISD.
    fn check_weight(&self, rows: usize, weight: usize) -> Result<(), DecodeError> {
        let guessed = match self.parameters() {
            StepParameters::Isd { p } => p,
            StepParameters::Stern { p, .. } | StepParameters::FsIsd { p, .. } => 2 * p,
            StepParameters::Mmt { .. } => return Ok(()),
        };
        if weight < guessed {
            return Err(DecodeError::Parameters {
                algorithm: self.name(),
                rows,
                reason: format!("weight {weight} is below the {guessed} columns guessed per match"),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmKind {
    Isd,
    #[default]
    Stern,
    Mmt,
    FsIsd,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 4] = [Self::Isd, Self::Stern, Self::Mmt, Self::FsIsd];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Isd => "isd",
            Self::Stern => "stern",
            Self::Mmt => "mmt",
            Self::FsIsd => "fs-isd",
        }
    }
}

impl std::fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "isd" | "prange" | "birthday" => Ok(Self::Isd),
            "stern" => Ok(Self::Stern),
            "mmt" => Ok(Self::Mmt),
            "fs-isd" | "fsisd" => Ok(Self::FsIsd),
            _ => Err(UnknownAlgorithm(s.to_owned())),
        }
    }
}

/// Resolved step parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "kebab-case")]
pub enum StepParameters {
    Isd { p: usize },
    Stern {
        p: usize,
        l: usize,
        join: JoinStrategy,
    },
    Mmt {
        p: usize,
        l1: usize,
        l2: usize,
        list_cap: usize,
        join: JoinStrategy,
    },
    FsIsd { p: usize, l: usize, offset: usize },
}

impl std::fmt::Display for StepParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Isd { p } => write!(f, "isd(p={p})"),
            Self::Stern { p, l, join } => write!(f, "stern(p={p}, l={l}, join={join})"),
            Self::Mmt {
                p,
                l1,
                l2,
                list_cap,
                join,
            } => write!(f, "mmt(p={p}, l1={l1}, l2={l2}, list_cap={list_cap}, join={join})"),
            Self::FsIsd { p, l, offset } => write!(f, "fs-isd(p={p}, l={l}, offset={offset})"),
        }
    }
}

/// The four steps behind one type, dispatched with a `match`.
#[derive(Debug, Clone, PartialEq)]
pub enum Algorithm {
    Isd(IsdStep),
    Stern(SternStep),
    Mmt(MmtStep),
    FsIsd(FsIsdStep),
}

impl Algorithm {
    /// Resolves `parameters` for a check matrix of shape `(rows, columns)`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Parameters`] when a projection window does not fit in the
    /// syndrome.
    pub fn new(
        kind: AlgorithmKind,
        parameters: &ParameterConfig,
        (rows, columns): (usize, usize),
    ) -> Result<Self, DecodeError> {
        let p = parameters.p(columns);
        let algorithm = match kind {
            AlgorithmKind::Isd => Self::Isd(IsdStep::new(p)),
            AlgorithmKind::Stern => Self::Stern(SternStep::with_join(p, parameters.l(columns), parameters.join)),
            AlgorithmKind::Mmt => {
                let (l1, l2) = (parameters.l1(columns), parameters.l2(columns));
                let half = (columns.saturating_sub(rows) + l1 + l2) / 2;
                let list_cap =
                    MmtStep::expected_list_cap(half, p, l2, parameters.collision_slack, parameters.max_collision_list);
                Self::Mmt(MmtStep::with_join(p, l1, l2, list_cap, parameters.join))
            }
            AlgorithmKind::FsIsd => Self::FsIsd(FsIsdStep::new(
                p,
                parameters.l(columns),
                parameters.window_offset,
            )),
        };
        algorithm.check_fits(rows)?;
        Ok(algorithm)
    }
}

impl DecodingStep for Algorithm {
    fn name(&self) -> &'static str {
        match self {
            Self::Isd(step) => step.name(),
            Self::Stern(step) => step.name(),
            Self::Mmt(step) => step.name(),
            Self::FsIsd(step) => step.name(),
        }
    }

    fn parameters(&self) -> StepParameters {
        match self {
            Self::Isd(step) => step.parameters(),
            Self::Stern(step) => step.parameters(),
            Self::Mmt(step) => step.parameters(),
            Self::FsIsd(step) => step.parameters(),
        }
    }

    fn reduce(&self, matrix: &mut BitMatrix, syndrome: &mut BitVec) -> bool {
        match self {
            Self::Isd(step) => step.reduce(matrix, syndrome),
            Self::Stern(step) => step.reduce(matrix, syndrome),
            Self::Mmt(step) => step.reduce(matrix, syndrome),
            Self::FsIsd(step) => step.reduce(matrix, syndrome),
        }
    }

    fn search(&self, matrix: &BitMatrix, syndrome: &BitVec, weight: usize) -> Option<BitVec> {
        match self {
            Self::Isd(step) => step.search(matrix, syndrome, weight),
            Self::Stern(step) => step.search(matrix, syndrome, weight),
            Self::Mmt(step) => step.search(matrix, syndrome, weight),
            Self::FsIsd(step) => step.search(matrix, syndrome, weight),
        }
    }
}

/// Columns of a reduced check matrix, stored one per row.
struct ReducedColumns {
    columns: BitMatrix,
    information: usize,
}

impl ReducedColumns {
    fn new(matrix: &BitMatrix) -> Self {
        Self {
            columns: matrix.transposed(),
            information: matrix.column_count() - matrix.row_count(),
        }
    }

    /// `syndrome` plus the selected columns over all rows.
    fn residual<'a>(&self, syndrome: &BitVec, indexes: impl IntoIterator<Item = &'a usize>) -> BitVec {
        let mut residual = syndrome.clone();
        for &index in indexes {
            BitwisePairMut::bitxor_assign(&mut residual, self.columns.row(index));
        }
        residual
    }

    /// Error vector with the guessed `indexes` plus identity column `k + r` for every set
    /// residual bit `r`.
    fn error_vector<'a>(&self, indexes: impl IntoIterator<Item = &'a usize>, residual: &BitVec) -> BitVec {
        let length = self.columns.row_count();
        let mut error = BitVec::with_support(length, indexes.into_iter().copied());
        for row in residual.support() {
            error.assign_index(self.information + row, true);
        }
        error
    }
}

/// Upper bound on the entries a subset-sum list reserves before it is filled.
const MAX_RESERVED_ENTRIES: usize = 1 << 20;

fn reserved_entries(candidates: usize, p: usize) -> usize {
    number_of_combinations(candidates, p).min(MAX_RESERVED_ENTRIES)
}

/// One collision entry per `p`-subset of `candidates`, keyed by the subset's column sum over
/// `window` (one row per column), plus `target` when given.
fn subset_sums(
    window: &BitMatrix,
    candidates: &[usize],
    p: usize,
    target: Option<&BitVec>,
) -> Vec<CollisionEntry> {
    let mut entries = Vec::with_capacity(reserved_entries(candidates.len(), p));
    Combination::new(candidates.len(), p).for_each(|positions| {
        let indexes: Vec<usize> = positions.iter().map(|&position| candidates[position]).collect();
        let mut key = window.sum_of_rows(&indexes);
        if let Some(target) = target {
            BitwisePairMut::bitxor_assign(&mut key, target);
        }
        entries.push(CollisionEntry::new(key, indexes));
    });
    entries
}

/// `None` once the guessed part alone outweighs the target.
fn remaining_weight(weight: usize, guessed: usize) -> Option<usize> {
    weight.checked_sub(guessed)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use gf2::{BitMatrix, BitVec, Bitwise};
    use rand::prelude::*;

    /// A systematic `[A | I]` matrix and the syndrome of an error with the given support.
    pub fn systematic_instance(rows: usize, columns: usize, support: &[usize], seed: u64) -> (BitMatrix, BitVec) {
        let mut random_number_generator = SmallRng::seed_from_u64(seed);
        let information = columns - rows;
        let mut matrix = BitMatrix::random(rows, columns, &mut random_number_generator);
        for row in 0..rows {
            for pivot in 0..rows {
                matrix.set((row, information + pivot), row == pivot);
            }
        }
        let error = BitVec::with_support(columns, support.iter().copied());
        let syndrome = &matrix * &error;
        debug_assert_eq!(error.weight(), support.len());
        (matrix, syndrome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturated_combination_counts_reserve_a_bounded_list() {
        assert_eq!(number_of_combinations(400, 200), usize::MAX);
        assert_eq!(reserved_entries(400, 200), MAX_RESERVED_ENTRIES);
        assert_eq!(reserved_entries(10, 3), 120);
        assert_eq!(reserved_entries(3, 5), 0);
    }

    #[test]
    fn subset_sums_are_empty_when_p_exceeds_the_candidates() {
        let window = BitMatrix::zeros(4, 2);
        assert!(subset_sums(&window, &[0, 1, 2], 5, None).is_empty());
    }

    #[test]
    fn weights_below_the_guessed_columns_are_rejected() {
        let stern = SternStep::new(2, 3);
        assert!(matches!(
            stern.check_weight(10, 3),
            Err(DecodeError::Parameters { algorithm: "stern", rows: 10, .. })
        ));
        assert_eq!(stern.check_weight(10, 4), Ok(()));
        assert!(FsIsdStep::new(1, 1, 0).check_weight(10, 1).is_err());
        assert!(IsdStep::new(2).check_weight(10, 1).is_err());
        assert_eq!(IsdStep::new(2).check_weight(10, 2), Ok(()));
        assert_eq!(MmtStep::new(3, 1, 1, 8).check_weight(10, 0), Ok(()));
    }
}
