mod bitvec;
mod index_set;

pub use bitvec::BitVec;
pub use index_set::{IndexSet, remapped};
