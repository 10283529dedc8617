//! Command-line or API options for the dense solvers.
//!
//! This module provides the `SolverOptions` struct, which is used to specify
//! solver parameters via command-line arguments or API calls. The available
//! solvers are the direct LU factorization and the SOR iteration; parameters
//! cover the relaxation factor, the convergence threshold, the sweep ceiling,
//! and the zero-pivot shift of the factorization.

use crate::solver::lu::PIVOT_SHIFT;

/// Solver types & parameters.
#[derive(Debug, Clone)]
pub struct SolverOptions {
    /// Type of solver (lu, sor)
    pub solver_type: String,

    /// Relaxation factor ω for SOR; `None` derives it from the Jacobi
    /// spectral radius.
    pub omega: Option<f64>,

    /// Absolute residual-norm threshold for SOR.
    pub tol: f64,

    /// Sweep ceiling for SOR.
    pub max_sweeps: usize,

    /// Value substituted for an exactly-zero pivot during LU factorization.
    pub pivot_shift: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            solver_type: "lu".to_string(),
            omega: None,
            tol: 1e-12,
            max_sweeps: 10_000,
            pivot_shift: PIVOT_SHIFT,
        }
    }
}
