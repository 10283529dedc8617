//! Integration tests for the pivoted LU factorization, cross-checked against
//! faer's full-pivoting LU as an independent reference.

use densolve::error::DsError;
use densolve::solver::{LinearSolver, LuFactor, LuSolver, residual};
use faer::Mat;
use faer::linalg::solvers::{FullPivLu, SolveCore};
use rand::Rng;

fn mat_from_rows(rows: &[&[f64]]) -> Mat<f64> {
    Mat::from_fn(rows.len(), rows[0].len(), |i, j| rows[i][j])
}

/// Independent reference solve via faer's full-pivoting LU.
fn reference_solve(a: &Mat<f64>, b: &[f64]) -> Vec<f64> {
    let factor = FullPivLu::new(a.as_ref());
    let mut y = b.to_vec();
    let n = y.len();
    let y_mat = faer::MatMut::from_column_major_slice_mut(&mut y, n, 1);
    factor.solve_in_place_with_conj(faer::Conj::No, y_mat);
    y
}

fn norm(v: &[f64]) -> f64 {
    v.iter().map(|vi| vi * vi).sum::<f64>().sqrt()
}

/// The 4x4 demonstration system: the solve must match the reference to six
/// decimal places and leave a residual at rounding level.
#[test]
fn four_by_four_matches_reference() {
    let a = mat_from_rows(&[
        &[3.81, 0.28, 1.28, 0.75],
        &[2.25, 1.32, 4.58, 0.49],
        &[5.31, 6.38, 0.98, 1.04],
        &[9.39, 2.45, 3.35, 2.28],
    ]);
    let b = vec![1.0, 1.0, 1.0, 1.0];

    let factor = LuFactor::new(&a).unwrap();
    let x = factor.solve(&b).unwrap();
    let x_ref = reference_solve(&a, &b);
    for (xi, ri) in x.iter().zip(x_ref.iter()) {
        assert!((xi - ri).abs() < 1e-6, "xi = {xi}, reference = {ri}");
    }
    let r_norm = norm(&residual(&a, &b, &x));
    assert!(r_norm <= 1e-13, "residual norm = {r_norm:e}");
}

/// Random well-conditioned SPD systems of sizes 2 through 10 agree with the
/// reference within floating-point tolerance.
#[test]
fn random_well_conditioned_sizes_2_to_10() {
    let mut rng = rand::thread_rng();
    for n in 2..=10 {
        // A = MᵀM + n·I is SPD and comfortably conditioned.
        let data: Vec<f64> = (0..n * n).map(|_| rng.r#gen()).collect();
        let m = Mat::from_fn(n, n, |i, j| data[j * n + i]);
        let m_t = m.transpose();
        let mut a = &m_t * &m;
        for i in 0..n {
            a[(i, i)] = a[(i, i)] + n as f64;
        }
        let b: Vec<f64> = (0..n).map(|_| rng.r#gen()).collect();

        let x = LuFactor::new(&a).unwrap().solve(&b).unwrap();
        let x_ref = reference_solve(&a, &b);
        for (xi, ri) in x.iter().zip(x_ref.iter()) {
            assert!((xi - ri).abs() < 1e-8, "n = {n}: xi = {xi}, reference = {ri}");
        }
        let r_norm = norm(&residual(&a, &b, &x));
        assert!(r_norm < 1e-9, "n = {n}: residual norm = {r_norm:e}");
    }
}

/// An all-zero row is a hard failure at factorization entry.
#[test]
fn singular_row_detected_up_front() {
    let a = mat_from_rows(&[
        &[1.0, 2.0, 3.0],
        &[0.0, 0.0, 0.0],
        &[4.0, 5.0, 6.0],
    ]);
    assert!(matches!(LuFactor::new(&a), Err(DsError::SingularRow(1))));
}

/// A right-hand side with leading zeros exercises the forward-substitution
/// skip; the result must be identical to the reference.
#[test]
fn leading_zero_rhs_matches_reference() {
    let a = mat_from_rows(&[
        &[3.81, 0.28, 1.28, 0.75],
        &[2.25, 1.32, 4.58, 0.49],
        &[5.31, 6.38, 0.98, 1.04],
        &[9.39, 2.45, 3.35, 2.28],
    ]);
    let b = vec![0.0, 0.0, 1.0, 1.0];
    let x = LuFactor::new(&a).unwrap().solve(&b).unwrap();
    let x_ref = reference_solve(&a, &b);
    for (xi, ri) in x.iter().zip(x_ref.iter()) {
        assert!((xi - ri).abs() < 1e-8, "xi = {xi}, reference = {ri}");
    }
}

/// An all-zero right-hand side solves to the zero vector.
#[test]
fn zero_rhs_solves_to_zero() {
    let a = mat_from_rows(&[&[2.0, 1.0], &[1.0, 3.0]]);
    let x = LuFactor::new(&a).unwrap().solve(&[0.0, 0.0]).unwrap();
    assert_eq!(x, vec![0.0, 0.0]);
}

/// The trait-level solver reports a converged single-step solve with the true
/// residual norm, and the cached factorization reproduces it.
#[test]
fn lu_solver_trait_and_cache() {
    let a = mat_from_rows(&[
        &[3.81, 0.28, 1.28, 0.75],
        &[2.25, 1.32, 4.58, 0.49],
        &[5.31, 6.38, 0.98, 1.04],
        &[9.39, 2.45, 3.35, 2.28],
    ]);
    let b = vec![1.0, 1.0, 1.0, 1.0];
    let mut x = vec![0.0; 4];
    let mut solver = LuSolver::new();
    let stats = solver.solve(&a, &b, &mut x).unwrap();
    assert!(stats.converged);
    assert_eq!(stats.iterations, 1);
    assert!(stats.final_residual <= 1e-13);

    let b2 = vec![2.0, -1.0, 0.5, 3.0];
    let x2 = solver.solve_cached(&b2).unwrap();
    let x2_ref = reference_solve(&a, &b2);
    for (xi, ri) in x2.iter().zip(x2_ref.iter()) {
        assert!((xi - ri).abs() < 1e-8, "xi = {xi}, reference = {ri}");
    }
}
