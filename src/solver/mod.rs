//! Direct & relaxation solver interfaces.

use crate::utils::convergence::SolveStats;

/// Common interface for any direct or iterative solver.
pub trait LinearSolver<M, V> {
    type Error;
    /// Solve A·x = b, writing result into `x`. For iterative solvers `x` is
    /// the initial guess on entry.
    /// Returns iteration stats (including convergence info).
    fn solve(
        &mut self,
        a: &M,
        b: &V,
        x: &mut V,
    ) -> Result<SolveStats<<Self as LinearSolver<M, V>>::Scalar>, Self::Error>;
    type Scalar: Copy + PartialOrd + From<f64>;
}

pub mod lu;
pub use lu::{LuFactor, LuSolver, PIVOT_SHIFT, residual};

pub mod sor;
pub use sor::{SorSolver, SweepType, optimal_omega, sor_solve};
