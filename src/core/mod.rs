//! Core linear-algebra traits and faer/Vec wrappers.

pub mod traits;
pub mod wrappers;

pub use traits::{Indexing, InnerProduct, MatShape, MatVec, MatrixGet};
