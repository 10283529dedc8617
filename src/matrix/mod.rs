//! Matrix module: dense matrix construction traits.

pub mod dense;
pub use dense::DenseMatrix;
