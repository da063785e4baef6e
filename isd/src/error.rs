use std::path::PathBuf;
use thiserror::Error;

/// An instance or parameter set the decoders refuse to work on.
///
/// Singular permutations and unsuccessful searches are not errors; they show up as
/// `Ok(None)` from the drivers once the permutation source or the iteration budget runs out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("check matrix has no rows")]
    EmptyMatrix,
    #[error("syndrome has {found} bits but the check matrix has {expected} rows")]
    SyndromeLength { expected: usize, found: usize },
    #[error("check matrix has {rows} rows but only {columns} columns")]
    TooManyRows { rows: usize, columns: usize },
    #[error("weight {weight} exceeds the code length {length}")]
    WeightTooLarge { weight: usize, length: usize },
    #[error("permutation has {found} entries, expected {expected}")]
    PermutationLength { expected: usize, found: usize },
    #[error("{algorithm} parameters do not fit an instance with {rows} check rows: {reason}")]
    Parameters {
        algorithm: &'static str,
        rows: usize,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read configuration {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed configuration")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed bit text")]
    Parse(#[from] gf2::ParseBitsError),
    #[error("syndrome text contains no bits")]
    EmptySyndrome,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm {0:?}, expected one of isd, stern, mmt, fs-isd")]
pub struct UnknownAlgorithm(pub String);
