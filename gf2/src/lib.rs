pub mod bit;
pub use bit::{Bitwise, BitwiseMut, BitwisePair, BitwisePairMut, WORD_BIT_LEN, Word};

pub mod vec;
pub use vec::{BitVec, IndexSet, remapped};

pub mod matrix;
pub use matrix::BitMatrix;

mod error;
pub use error::{ParseBitsError, ShapeError};

#[cfg(feature = "serde")]
mod serde;
