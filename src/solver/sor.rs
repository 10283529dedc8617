//! Successive Over-Relaxation for dense square systems.
//!
//! The sweep is Gauss-Seidel style: row `i` of a pass reads the entries of
//! `phi` already updated earlier in the same pass. Convergence is judged by an
//! absolute bound on the Euclidean norm of `A·phi − b`, recomputed after every
//! full sweep, and the iteration is bounded: exhausting the sweep ceiling is a
//! reported [`DsError::NonConvergence`], never a hang.
//!
//! `optimal_omega` derives the classical optimal relaxation factor
//! `ω = 2 / (1 + √(1 − ρ²))` from the spectral radius ρ of the Jacobi
//! iteration matrix. The formula assumes a real Jacobi spectrum; a radius at
//! or above 1 is rejected rather than producing a value outside the reals.

use bitflags::bitflags;
use num_traits::{Float, NumCast};
use std::fmt;

use crate::core::traits::{InnerProduct, MatShape, MatrixGet};
use crate::error::DsError;
use crate::solver::LinearSolver;
use crate::solver::lu::residual;
use crate::utils::convergence::{Convergence, SolveStats};
use crate::utils::spectral::{JacobiMatrix, spectral_radius};

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct SweepType: u32 {
        const FORWARD   = 0b01; // increasing row order
        const BACKWARD  = 0b10;
        const SYMMETRIC = Self::FORWARD.bits() | Self::BACKWARD.bits();
    }
}

const RHO_TOL: f64 = 1e-12;
const RHO_MAX_ITERS: usize = 10_000;

/// Relaxation solver with a bounded sweep loop.
pub struct SorSolver<T> {
    pub conv: Convergence<T>,
    pub omega: T,
    pub sweep: SweepType,
}

impl<T: Float> SorSolver<T> {
    /// Forward-sweep solver with an absolute residual tolerance and a sweep
    /// ceiling.
    pub fn new(omega: T, tol: T, max_sweeps: usize) -> Self {
        Self {
            conv: Convergence { tol, max_iters: max_sweeps },
            omega,
            sweep: SweepType::FORWARD,
        }
    }

    pub fn set_omega(&mut self, omega: T) {
        self.omega = omega;
    }
    pub fn omega(&self) -> T {
        self.omega
    }
    pub fn set_sweep(&mut self, sweep: SweepType) {
        self.sweep = sweep;
    }
    pub fn sweep(&self) -> SweepType {
        self.sweep
    }
}

impl<T: Float + fmt::Display> fmt::Display for SorSolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SOR(omega={}, tol={}, max_sweeps={}, sweep={:?})",
            self.omega, self.conv.tol, self.conv.max_iters, self.sweep
        )
    }
}

fn sweep_forward<M, T>(a: &M, b: &[T], inv_diag: &[T], omega: T, phi: &mut [T])
where
    M: MatrixGet<T> + MatShape,
    T: Float,
{
    let n = b.len();
    for i in 0..n {
        let mut sigma = T::zero();
        for j in 0..n {
            if j != i {
                sigma = sigma + a.get(i, j) * phi[j];
            }
        }
        phi[i] = (T::one() - omega) * phi[i] + omega * inv_diag[i] * (b[i] - sigma);
    }
}

fn sweep_backward<M, T>(a: &M, b: &[T], inv_diag: &[T], omega: T, phi: &mut [T])
where
    M: MatrixGet<T> + MatShape,
    T: Float,
{
    let n = b.len();
    for i in (0..n).rev() {
        let mut sigma = T::zero();
        for j in 0..n {
            if j != i {
                sigma = sigma + a.get(i, j) * phi[j];
            }
        }
        phi[i] = (T::one() - omega) * phi[i] + omega * inv_diag[i] * (b[i] - sigma);
    }
}

impl<M, T> LinearSolver<M, Vec<T>> for SorSolver<T>
where
    M: MatrixGet<T> + MatShape,
    T: Float + From<f64> + Send + Sync,
{
    type Error = DsError;
    type Scalar = T;

    /// Iterate sweeps until `‖A·x − b‖₂` drops to the tolerance.
    ///
    /// `x` holds the initial guess on entry and the converged iterate on
    /// success. A guess that already satisfies the tolerance returns after
    /// zero sweeps. Exceeding the sweep ceiling fails with `NonConvergence`.
    fn solve(&mut self, a: &M, b: &Vec<T>, x: &mut Vec<T>) -> Result<SolveStats<T>, DsError> {
        let n = a.nrows();
        if a.ncols() != n {
            return Err(DsError::NotSquare(n, a.ncols()));
        }
        if b.len() != n || x.len() != n {
            return Err(DsError::DimensionMismatch(format!(
                "rhs has length {}, guess has length {}, matrix dimension is {}",
                b.len(),
                x.len(),
                n
            )));
        }
        let omega = self.omega;
        if !(omega > T::zero() && omega < <T as NumCast>::from(2.0).unwrap()) {
            return Err(DsError::InvalidOmega(omega.to_f64().unwrap_or(f64::NAN)));
        }
        if !self.sweep.intersects(SweepType::SYMMETRIC) {
            return Err(DsError::Unsupported("sweep type selects no sweep direction"));
        }
        let mut inv_diag = vec![T::zero(); n];
        for i in 0..n {
            let aii = a.get(i, i);
            if aii == T::zero() {
                return Err(DsError::ZeroPivot(i));
            }
            inv_diag[i] = T::one() / aii;
        }

        let ip = ();
        let mut res_norm = ip.norm(&residual(a, b, x));
        let (_, mut stats) = self.conv.check(res_norm, 0);
        if stats.converged {
            return Ok(stats);
        }
        for i in 1..=self.conv.max_iters {
            if self.sweep.intersects(SweepType::FORWARD) {
                sweep_forward(a, b, &inv_diag, omega, x);
            }
            if self.sweep.intersects(SweepType::BACKWARD) {
                sweep_backward(a, b, &inv_diag, omega, x);
            }
            res_norm = ip.norm(&residual(a, b, x));
            let (stop, s) = self.conv.check(res_norm, i);
            stats = s;
            if stats.converged {
                return Ok(stats);
            }
            if stop {
                break;
            }
        }
        Err(DsError::NonConvergence {
            iterations: stats.iterations,
            residual: stats.final_residual.to_f64().unwrap_or(f64::NAN),
        })
    }
}

/// Solve `A·phi = b` by forward SOR sweeps from `initial_guess`.
///
/// Returns the converged iterate and its residual norm, or `NonConvergence`
/// once `max_sweeps` full passes have run without the residual norm dropping
/// to `tol`.
pub fn sor_solve<M, T>(
    a: &M,
    b: &[T],
    omega: T,
    initial_guess: &[T],
    tol: T,
    max_sweeps: usize,
) -> Result<(Vec<T>, T), DsError>
where
    M: MatrixGet<T> + MatShape,
    T: Float + From<f64> + Send + Sync,
{
    let mut phi = initial_guess.to_vec();
    let mut solver = SorSolver::new(omega, tol, max_sweeps);
    let stats = solver.solve(a, &b.to_vec(), &mut phi)?;
    Ok((phi, stats.final_residual))
}

/// Theoretically optimal relaxation factor `2 / (1 + √(1 − ρ²))`, where ρ is
/// the spectral radius of the Jacobi iteration matrix `D⁻¹(L + U)` of `a`.
///
/// Valid when the Jacobi spectrum is real, the classical setting being a
/// symmetric positive-definite, consistently-ordered matrix. A radius at or
/// above 1 would take the square root out of the reals and fails with
/// [`DsError::SpectralRadiusOutOfRange`].
pub fn optimal_omega<M, T>(a: &M) -> Result<T, DsError>
where
    M: MatrixGet<T> + MatShape,
    T: Float + From<f64> + Send + Sync,
{
    let jac = JacobiMatrix::new(a)?;
    let rho = spectral_radius(&jac, <T as NumCast>::from(RHO_TOL).unwrap(), RHO_MAX_ITERS)?;
    if rho >= T::one() {
        return Err(DsError::SpectralRadiusOutOfRange(
            rho.to_f64().unwrap_or(f64::NAN),
        ));
    }
    let two = <T as NumCast>::from(2.0).unwrap();
    Ok(two / (T::one() + (T::one() - rho * rho).sqrt()))
}
