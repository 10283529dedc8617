//! Convergence tracking & tolerance checks for iterative solvers.

/// Stopping criteria & stats.
pub struct Convergence<T> {
    pub tol: T,
    pub max_iters: usize,
}

#[derive(Clone, Debug)]
pub struct SolveStats<T> {
    pub iterations: usize,
    pub final_residual: T,
    pub converged: bool,
}

impl<T: Copy + num_traits::Float> Convergence<T> {
    /// Returns (should_stop, stats) given current `res_norm` and iteration `i`.
    ///
    /// The criterion is an absolute bound on the residual norm; `should_stop`
    /// is also raised once the iteration ceiling is reached, converged or not.
    pub fn check(&self, res_norm: T, i: usize) -> (bool, SolveStats<T>) {
        let converged = res_norm <= self.tol;
        let stop = converged || i >= self.max_iters;
        (
            stop,
            SolveStats {
                iterations: i,
                final_residual: res_norm,
                converged,
            },
        )
    }
}
