//! Text forms of check matrices, syndromes and error vectors.
//!
//! A matrix is one row per line and a syndrome is the first non-empty line of its text.
//! Blank lines and whitespace inside a line are ignored. In [`BitOrder::Natural`] character
//! `i` of a line is column `i`; [`BitOrder::Reversed`] reads and writes lines with column 0
//! as the last character.

use crate::error::InputError;
use gf2::{BitMatrix, BitVec};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitOrder {
    #[default]
    Natural,
    Reversed,
}

impl BitOrder {
    fn arrange(self, line: &str) -> String {
        let bits = line.chars().filter(|character| !character.is_whitespace());
        match self {
            Self::Natural => bits.collect(),
            Self::Reversed => bits.rev().collect(),
        }
    }
}

/// ```
/// use isd::io::{BitOrder, parse_check_matrix};
///
/// let natural = parse_check_matrix("100\n011\n", BitOrder::Natural).unwrap();
/// let reversed = parse_check_matrix("001\n110\n", BitOrder::Reversed).unwrap();
/// assert_eq!(natural, reversed);
/// ```
///
/// # Errors
///
/// Returns [`InputError::Parse`] for characters other than `0` and `1`, ragged rows or a
/// text without rows.
pub fn parse_check_matrix(text: &str, order: BitOrder) -> Result<BitMatrix, InputError> {
    let rows = text
        .lines()
        .map(|line| order.arrange(line))
        .filter(|line| !line.is_empty())
        .map(|line| line.parse::<BitVec>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(BitMatrix::from_rows(rows).map_err(gf2::ParseBitsError::from)?)
}

/// # Errors
///
/// Returns [`InputError::EmptySyndrome`] when no line carries bits and
/// [`InputError::Parse`] for characters other than `0` and `1`.
pub fn parse_syndrome(text: &str, order: BitOrder) -> Result<BitVec, InputError> {
    let line = text
        .lines()
        .map(|line| order.arrange(line))
        .find(|line| !line.is_empty())
        .ok_or(InputError::EmptySyndrome)?;
    Ok(line.parse()?)
}

/// One line of `0`/`1` characters.
#[must_use]
pub fn format_error_vector(error: &BitVec, order: BitOrder) -> String {
    order.arrange(&error.to_string())
}

fn read(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// # Errors
///
/// See [`parse_check_matrix`]; unreadable files give [`InputError::Io`].
pub fn read_check_matrix(path: impl AsRef<Path>, order: BitOrder) -> Result<BitMatrix, InputError> {
    parse_check_matrix(&read(path.as_ref())?, order)
}

/// # Errors
///
/// See [`parse_syndrome`]; unreadable files give [`InputError::Io`].
pub fn read_syndrome(path: impl AsRef<Path>, order: BitOrder) -> Result<BitVec, InputError> {
    parse_syndrome(&read(path.as_ref())?, order)
}
