use thiserror::Error;

// Unified error type for densolve

#[derive(Error, Debug)]
pub enum DsError {
    #[error("singular matrix: row {0} is entirely zero")]
    SingularRow(usize),
    #[error("matrix is not square ({0}x{1})")]
    NotSquare(usize, usize),
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("zero diagonal entry at row {0}")]
    ZeroPivot(usize),
    #[error("relaxation factor {0} outside the open interval (0, 2)")]
    InvalidOmega(f64),
    #[error("jacobi spectral radius {0} is not below 1; optimal relaxation factor is undefined")]
    SpectralRadiusOutOfRange(f64),
    #[error("no convergence after {iterations} iterations (residual {residual:e})")]
    NonConvergence { iterations: usize, residual: f64 },
    #[error("solve_cached called before any factorization")]
    FactorNotReady,
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}
