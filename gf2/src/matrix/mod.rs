mod bitmatrix;
pub mod transpose_kernel;

pub use bitmatrix::BitMatrix;
