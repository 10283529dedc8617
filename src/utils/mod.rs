//! Convergence tracking and spectral estimation utilities.

pub mod convergence;
pub mod spectral;

pub use convergence::{Convergence, SolveStats};
pub use spectral::{JacobiMatrix, spectral_radius};
