pub mod bitwise;
pub mod words;

pub use bitwise::{Bitwise, BitwiseMut, BitwisePair, BitwisePairMut};
pub use words::{WordSupport, word_count};

/// Storage unit of every bit container in this crate.
pub type Word = u64;

pub const WORD_BIT_LEN: usize = Word::BITS as usize;
