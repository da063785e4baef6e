use thiserror::Error;

/// A row list that does not form a matrix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("a matrix needs at least one row")]
    Empty,
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBitsError {
    #[error("invalid bit character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },
    #[error(transparent)]
    Shape(#[from] ShapeError),
}
