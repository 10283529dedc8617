//! densolve: direct and relaxation solvers for small dense linear systems.
//!
//! This crate provides two independent solvers for `A x = b` on small square
//! dense matrices: a Crout-style LU factorization with scaled partial pivoting
//! (`LuFactor`/`LuSolver`), and a Successive Over-Relaxation iteration
//! (`SorSolver`/`sor_solve`) with a spectrally derived optimal relaxation
//! factor (`optimal_omega`). Faer's own factorizations are never used by the
//! solver cores; they serve as the independent reference in tests and benches.

pub mod config;
pub mod core;
pub mod error;
pub mod matrix;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use crate::config::*;
pub use crate::core::*;
pub use crate::error::*;
pub use crate::matrix::*;
pub use crate::solver::*;
pub use crate::utils::*;

// Re-export SolveStats at the crate root for convenience
pub use crate::utils::convergence::SolveStats;
