//! Direct dense solver: Crout-style LU factorization with scaled partial
//! pivoting.
//!
//! `LuFactor` owns the packed decomposition (U on and above the diagonal, the
//! unit-lower-triangular multipliers below it) in a contiguous row-major
//! buffer, together with the sequence of pivot rows chosen during
//! factorization. The pivot sequence is replayed in order during substitution;
//! it is not a final-position permutation array.
//!
//! # References
//! - Press et al., Numerical Recipes, §2.3 (LU Decomposition and Its
//!   Applications)
//! - Golub & Van Loan, Matrix Computations

use crate::core::traits::{InnerProduct, MatShape, MatrixGet};
use crate::error::DsError;
use crate::solver::LinearSolver;
use crate::utils::convergence::SolveStats;
use num_traits::Float;

/// Value substituted for a pivot that becomes exactly zero mid-factorization.
///
/// Rows that are entirely zero are rejected up front with
/// [`DsError::SingularRow`]; a pivot that only degenerates during elimination
/// is patched with this shift instead, trading a hard failure for a
/// large-but-finite solve. Callers that want a different trade-off can pass
/// their own shift to [`LuFactor::with_shift`].
pub const PIVOT_SHIFT: f64 = 1.0e-40;

/// Packed LU decomposition of a square matrix, with partial pivoting.
pub struct LuFactor<T> {
    n: usize,
    /// Row-major packed factors: U in the upper triangle including the
    /// diagonal, L's sub-diagonal multipliers below it.
    lu: Vec<T>,
    /// Pivot row chosen at each elimination step, in step order.
    pivots: Vec<usize>,
}

impl<T: Float> LuFactor<T> {
    /// Factor a square matrix, pivoting with the default zero-pivot shift.
    pub fn new<M>(a: &M) -> Result<Self, DsError>
    where
        M: MatrixGet<T> + MatShape,
    {
        Self::with_shift(a, T::from(PIVOT_SHIFT).unwrap())
    }

    /// Factor a square matrix, substituting `shift` for exactly-zero pivots.
    ///
    /// Fails with [`DsError::SingularRow`] if any row of `a` is entirely
    /// zero, detected before any elimination work. Pivot rows are selected by
    /// the scaled criterion `scale[i] * |lu[i][k]|`, where `scale[i]` is the
    /// reciprocal of the largest magnitude in row `i`; the first maximum wins.
    pub fn with_shift<M>(a: &M, shift: T) -> Result<Self, DsError>
    where
        M: MatrixGet<T> + MatShape,
    {
        let n = a.nrows();
        if a.ncols() != n {
            return Err(DsError::NotSquare(n, a.ncols()));
        }
        let mut lu = vec![T::zero(); n * n];
        for i in 0..n {
            for j in 0..n {
                lu[i * n + j] = a.get(i, j);
            }
        }

        // Implicit scaling of each row, and the all-zero-row check.
        let mut scale = vec![T::zero(); n];
        for i in 0..n {
            let mut big = T::zero();
            for j in 0..n {
                let temp = lu[i * n + j].abs();
                if temp > big {
                    big = temp;
                }
            }
            if big == T::zero() {
                return Err(DsError::SingularRow(i));
            }
            scale[i] = T::one() / big;
        }

        let mut pivots = vec![0usize; n];
        for k in 0..n {
            // Search for the pivot row; strict > keeps the first maximum.
            let mut big = T::zero();
            let mut imax = k;
            for i in k..n {
                let temp = scale[i] * lu[i * n + k].abs();
                if temp > big {
                    big = temp;
                    imax = i;
                }
            }
            if imax != k {
                // imax > k, so the two row slices are disjoint.
                let (head, tail) = lu.split_at_mut(imax * n);
                head[k * n..k * n + n].swap_with_slice(&mut tail[..n]);
                scale[imax] = scale[k];
            }
            pivots[k] = imax;

            if lu[k * n + k] == T::zero() {
                lu[k * n + k] = shift;
            }

            for i in (k + 1)..n {
                let m = lu[i * n + k] / lu[k * n + k];
                lu[i * n + k] = m;
                for j in (k + 1)..n {
                    lu[i * n + j] = lu[i * n + j] - m * lu[k * n + j];
                }
            }
        }

        Ok(LuFactor { n, lu, pivots })
    }

    /// Dimension of the factored matrix.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Pivot rows chosen at each elimination step, in step order.
    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    /// Solve `A x = b` using the packed factors.
    ///
    /// Applies the recorded pivot sequence while forward-substituting with
    /// the implicit unit lower factor, then back-substitutes with the upper
    /// factor. The forward pass skips accumulation until the first non-zero
    /// element of the permuted right-hand side; this only avoids work on
    /// leading zeros and produces results identical to full accumulation.
    pub fn solve(&self, b: &[T]) -> Result<Vec<T>, DsError> {
        let n = self.n;
        if b.len() != n {
            return Err(DsError::DimensionMismatch(format!(
                "rhs has length {}, matrix dimension is {}",
                b.len(),
                n
            )));
        }
        let mut x = b.to_vec();

        let mut first_nonzero: Option<usize> = None;
        for i in 0..n {
            let ip = self.pivots[i];
            let mut sum = x[ip];
            x[ip] = x[i];
            if let Some(start) = first_nonzero {
                for j in start..i {
                    sum = sum - self.lu[i * n + j] * x[j];
                }
            } else if sum != T::zero() {
                first_nonzero = Some(i);
            }
            x[i] = sum;
        }

        for i in (0..n).rev() {
            let mut sum = x[i];
            for j in (i + 1)..n {
                sum = sum - self.lu[i * n + j] * x[j];
            }
            // Diagonal is non-zero by construction.
            x[i] = sum / self.lu[i * n + i];
        }
        Ok(x)
    }
}

/// Residual `r = A·x − b` against the original, unfactored matrix.
pub fn residual<M, T>(a: &M, b: &[T], x: &[T]) -> Vec<T>
where
    M: MatrixGet<T> + MatShape,
    T: Float,
{
    let n = a.nrows();
    assert_eq!(a.ncols(), n, "residual requires a square matrix");
    assert_eq!(b.len(), n, "Right-hand side b has incorrect length");
    assert_eq!(x.len(), n, "Solution vector x has incorrect length");
    let mut r = vec![T::zero(); n];
    for i in 0..n {
        let mut sum = -b[i];
        for j in 0..n {
            sum = sum + a.get(i, j) * x[j];
        }
        r[i] = sum;
    }
    r
}

/// Direct solver over `LuFactor`, caching the factorization for reuse.
pub struct LuSolver<T> {
    /// Cached factorization (if computed)
    factor: Option<LuFactor<T>>,
    shift: T,
}

impl<T: Float> LuSolver<T> {
    /// Create a new LU solver (no factorization yet).
    pub fn new() -> Self {
        LuSolver { factor: None, shift: T::from(PIVOT_SHIFT).unwrap() }
    }

    /// Create a solver with a caller-chosen zero-pivot shift.
    pub fn with_shift(shift: T) -> Self {
        LuSolver { factor: None, shift }
    }

    /// Solve against the cached factorization.
    ///
    /// Fails with [`DsError::FactorNotReady`] if no factorization has been
    /// performed yet.
    pub fn solve_cached(&self, b: &[T]) -> Result<Vec<T>, DsError> {
        match &self.factor {
            Some(factor) => factor.solve(b),
            None => Err(DsError::FactorNotReady),
        }
    }
}

impl<M, T> LinearSolver<M, Vec<T>> for LuSolver<T>
where
    M: MatrixGet<T> + MatShape,
    T: Float + From<f64> + Send + Sync,
{
    type Error = DsError;
    type Scalar = T;

    /// Solve Ax = b by factor-then-substitute.
    ///
    /// The input value of `x` is ignored; on success it holds the solution.
    /// Stats always report a single "iteration" with the true residual norm
    /// of the computed solution.
    fn solve(&mut self, a: &M, b: &Vec<T>, x: &mut Vec<T>) -> Result<SolveStats<T>, DsError> {
        let factor = LuFactor::with_shift(a, self.shift)?;
        *x = factor.solve(b)?;
        self.factor = Some(factor);
        let ip = ();
        let res_norm = ip.norm(&residual(a, b, x));
        Ok(SolveStats {
            iterations: 1,
            final_residual: res_norm,
            converged: true,
        })
    }
}

impl<T: Float> Default for LuSolver<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::Mat;

    fn mat_from_rows(rows: &[&[f64]]) -> Mat<f64> {
        Mat::from_fn(rows.len(), rows[0].len(), |i, j| rows[i][j])
    }

    #[test]
    fn solves_system_needing_a_row_swap() {
        // Column 0 forces the pivot onto the second row.
        let a = mat_from_rows(&[&[0.0, 1.0], &[1.0, 0.0]]);
        let factor = LuFactor::new(&a).unwrap();
        let x = factor.solve(&[1.0, 2.0]).unwrap();
        assert!((x[0] - 2.0).abs() < 1e-14);
        assert!((x[1] - 1.0).abs() < 1e-14);
        assert_eq!(factor.pivots(), &[1, 1]);
    }

    #[test]
    fn rejects_all_zero_row_before_elimination() {
        let a = mat_from_rows(&[&[1.0, 2.0], &[0.0, 0.0]]);
        assert!(matches!(LuFactor::new(&a), Err(DsError::SingularRow(1))));
    }

    #[test]
    fn rejects_non_square() {
        let a = Mat::<f64>::zeros(2, 3);
        assert!(matches!(LuFactor::new(&a), Err(DsError::NotSquare(2, 3))));
    }

    #[test]
    fn rejects_wrong_rhs_length() {
        let a = mat_from_rows(&[&[2.0, 0.0], &[0.0, 2.0]]);
        let factor = LuFactor::new(&a).unwrap();
        assert!(matches!(
            factor.solve(&[1.0, 1.0, 1.0]),
            Err(DsError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn zero_pivot_mid_factorization_is_patched() {
        // No zero row, but rank 1: elimination produces an exact zero pivot.
        let a = mat_from_rows(&[&[1.0, 2.0], &[2.0, 4.0]]);
        let factor = LuFactor::new(&a).unwrap();
        let x = factor.solve(&[1.0, 1.0]).unwrap();
        assert!(x.iter().all(|xi| !xi.is_nan()));
    }

    #[test]
    fn residual_of_exact_solution_is_near_zero() {
        let a = mat_from_rows(&[&[4.0, 1.0, 0.0], &[1.0, 3.0, 1.0], &[0.0, 1.0, 2.0]]);
        let b = vec![6.0, 8.0, 8.0];
        let x = LuFactor::new(&a).unwrap().solve(&b).unwrap();
        let r = residual(&a, &b, &x);
        let norm = r.iter().map(|ri| ri * ri).sum::<f64>().sqrt();
        assert!(norm < 1e-9, "residual norm = {norm:e}");
    }

    #[test]
    fn cached_solve_requires_a_factorization() {
        let solver = LuSolver::<f64>::new();
        assert!(matches!(solver.solve_cached(&[1.0]), Err(DsError::FactorNotReady)));
    }

    #[test]
    fn trait_solve_reports_residual_and_caches() {
        let a = mat_from_rows(&[&[2.0, 1.0], &[1.0, 3.0]]);
        let b = vec![3.0, 5.0];
        let mut x = vec![0.0; 2];
        let mut solver = LuSolver::new();
        let stats = solver.solve(&a, &b, &mut x).unwrap();
        assert!(stats.converged);
        assert_eq!(stats.iterations, 1);
        assert!(stats.final_residual < 1e-12);
        let x2 = solver.solve_cached(&b).unwrap();
        assert_eq!(x, x2);
    }
}
