//! Spectral-radius estimation for the Jacobi iteration matrix.
//!
//! The optimal SOR relaxation factor is derived from the spectral radius of
//! `J = D⁻¹(L + U)`, where `D`, `L`, `U` are the diagonal, strictly-lower and
//! strictly-upper parts of the system matrix. The radius is estimated by power
//! iteration on `J²`: the Jacobi spectrum of consistently-ordered matrices is
//! symmetric about zero (eigenvalues come in ±μ pairs), which defeats plain
//! power iteration, while the squared operator has a non-negative dominant
//! eigenvalue μ² and converges.

use crate::core::traits::{Indexing, InnerProduct, MatShape, MatVec, MatrixGet};
use crate::error::DsError;
use num_traits::{Float, NumCast};

/// Dense Jacobi iteration matrix `D⁻¹(L + U)` of a square matrix.
///
/// Stored as an owned row-major buffer with a zero diagonal. Only the
/// matrix-vector product is needed downstream, so the type implements
/// `MatVec` and `Indexing` and nothing else.
pub struct JacobiMatrix<T> {
    n: usize,
    data: Vec<T>,
}

impl<T: Float> JacobiMatrix<T> {
    /// Build `D⁻¹(L + U)` from a square matrix with a non-zero diagonal.
    pub fn new<M>(a: &M) -> Result<Self, DsError>
    where
        M: MatrixGet<T> + MatShape,
    {
        let n = a.nrows();
        if a.ncols() != n {
            return Err(DsError::NotSquare(n, a.ncols()));
        }
        let mut data = vec![T::zero(); n * n];
        for i in 0..n {
            let aii = a.get(i, i);
            if aii == T::zero() {
                return Err(DsError::ZeroPivot(i));
            }
            for j in 0..n {
                if j != i {
                    data[i * n + j] = a.get(i, j) / aii;
                }
            }
        }
        Ok(JacobiMatrix { n, data })
    }
}

impl<T: Float> MatVec<Vec<T>> for JacobiMatrix<T> {
    fn matvec(&self, x: &Vec<T>, y: &mut Vec<T>) {
        assert_eq!(self.n, y.len(), "Output vector y has incorrect length");
        assert_eq!(self.n, x.len(), "Input vector x has incorrect length");
        for i in 0..self.n {
            let row = &self.data[i * self.n..(i + 1) * self.n];
            y[i] = row
                .iter()
                .zip(x.iter())
                .fold(T::zero(), |acc, (&aij, &xj)| acc + aij * xj);
        }
    }
}

impl<T> Indexing for JacobiMatrix<T> {
    fn nrows(&self) -> usize {
        self.n
    }
}

/// Estimate the spectral radius ρ(M) of a square operator by power iteration
/// on `M²` (two products per step).
///
/// Converges when two successive dominant-magnitude estimates agree to `tol`
/// (relative, floored at 1); a zero operator yields 0. Returns
/// `NonConvergence` if the estimate has not settled after `max_iters` steps,
/// which is the case when the dominant eigenvalue of `M²` is complex.
pub fn spectral_radius<M, T>(m: &M, tol: T, max_iters: usize) -> Result<T, DsError>
where
    M: MatVec<Vec<T>> + Indexing,
    T: Float + From<f64> + Send + Sync,
{
    let n = m.nrows();
    let ip = ();
    // Seed with an asymmetric vector so no dominant eigencomponent is lost to
    // an unlucky orthogonal start.
    let mut v: Vec<T> = (0..n)
        .map(|i| {
            T::one()
                + <T as NumCast>::from(i).unwrap() / <T as NumCast>::from(n + 1).unwrap()
        })
        .collect();
    let vnorm = ip.norm(&v);
    for vi in v.iter_mut() {
        *vi = *vi / vnorm;
    }
    let mut u = vec![T::zero(); n];
    let mut w = vec![T::zero(); n];
    let mut lambda_prev = T::zero();
    let mut delta = T::infinity();
    for _ in 0..max_iters {
        m.matvec(&v, &mut u);
        m.matvec(&u, &mut w);
        // ‖M² v‖ with ‖v‖ = 1 tends to ρ(M²) = ρ(M)².
        let lambda = ip.norm(&w);
        if lambda == T::zero() {
            return Ok(T::zero());
        }
        delta = (lambda - lambda_prev).abs();
        if delta <= tol * lambda.max(T::one()) {
            return Ok(lambda.sqrt());
        }
        for (vi, wi) in v.iter_mut().zip(w.iter()) {
            *vi = *wi / lambda;
        }
        lambda_prev = lambda;
    }
    Err(DsError::NonConvergence {
        iterations: max_iters,
        residual: delta.to_f64().unwrap_or(f64::NAN),
    })
}
