//! Information-set decoding of binary linear codes.
//!
//! Given a parity-check matrix `H` with `n` columns and `n - k` rows, a syndrome `s` and a
//! weight `ω`, the decoders in this crate search for an error vector `e` of weight `ω` with
//! `H·e = s` over GF(2). Every attempt draws a column permutation, reduces the permuted
//! matrix to systematic form with [`gauss::gauss_elimination`] and runs one of the
//! [`step`] algorithms on the result.
//!
//! ```
//! use gf2::{BitMatrix, BitVec};
//! use isd::{Decoder, DecoderConfig, Instance, syndrome_of};
//! use isd::step::AlgorithmKind;
//!
//! let check_matrix: BitMatrix = "1010101\n0110011\n0001111".parse().unwrap();
//! let error = BitVec::with_support(7, [1]);
//! let syndrome = syndrome_of(&check_matrix, &error);
//! let instance = Instance::new(check_matrix, syndrome, 1).unwrap();
//!
//! let config = DecoderConfig { algorithm: AlgorithmKind::Isd, seed: Some(3), ..Default::default() };
//! let solution = Decoder::new(config).unwrap().decode(&instance).unwrap().unwrap();
//! assert!(instance.verify(&solution.error_vector));
//! ```

pub mod collision;
pub mod combination;
pub mod config;
pub mod decoder;
mod error;
pub mod gauss;
pub mod io;
pub mod permutation;
pub mod step;

pub use combination::{Combination, number_of_combinations};
pub use config::{DecoderConfig, ParameterConfig, PermutationStrategy};
pub use decoder::{Decoder, Instance, SearchStats, Solution, decode, decode_parallel, syndrome_of};
pub use error::{ConfigError, DecodeError, InputError, UnknownAlgorithm};
pub use permutation::{Permutation, PermutationCursor};
pub use step::{Algorithm, AlgorithmKind, DecodingStep, StepParameters};
