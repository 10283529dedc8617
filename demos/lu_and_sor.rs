use densolve::config::SolverOptions;
use densolve::solver::{LuFactor, optimal_omega, residual, sor_solve};
use faer::Mat;
use faer::linalg::solvers::SolveCore;

fn reference_solve(a: &Mat<f64>, b: &[f64]) -> Vec<f64> {
    let factor = faer::linalg::solvers::FullPivLu::new(a.as_ref());
    let mut y = b.to_vec();
    let n = y.len();
    let y_mat = faer::MatMut::from_column_major_slice_mut(&mut y, n, 1);
    factor.solve_in_place_with_conj(faer::Conj::No, y_mat);
    y
}

fn norm(v: &[f64]) -> f64 {
    v.iter().map(|vi| vi * vi).sum::<f64>().sqrt()
}

fn main() {
    // Direct solve of a 4x4 system.
    let a = Mat::from_fn(4, 4, |i, j| {
        [
            [3.81, 0.28, 1.28, 0.75],
            [2.25, 1.32, 4.58, 0.49],
            [5.31, 6.38, 0.98, 1.04],
            [9.39, 2.45, 3.35, 2.28],
        ][i][j]
    });
    let b = vec![1.0; 4];
    let factor = LuFactor::new(&a).unwrap();
    let x = factor.solve(&b).unwrap();
    println!("LU solution:");
    for xi in &x {
        println!("{xi:.6}");
    }
    println!("residual norm = {:.2e}", norm(&residual(&a, &b, &x)));
    println!("reference solution: {:?}\n", reference_solve(&a, &b));

    // SOR solve of a 6x6 symmetric system with the spectrally derived omega.
    let a = Mat::from_fn(6, 6, |i, j| {
        [
            [40.0, -16.0, 0.0, -16.0, 0.0, 0.0],
            [-16.0, 97.0, -36.0, 0.0, -36.0, 0.0],
            [0.0, -36.0, 180.0, 0.0, 0.0, -64.0],
            [-16.0, 0.0, 0.0, 97.0, -36.0, 0.0],
            [0.0, -36.0, 0.0, -36.0, 234.0, -81.0],
            [0.0, 0.0, -64.0, 0.0, -81.0, 433.0],
        ][i][j]
    });
    let b = vec![1.0; 6];
    let opts = SolverOptions { solver_type: "sor".to_string(), ..Default::default() };
    let omega = match opts.omega {
        Some(w) => w,
        None => optimal_omega(&a).unwrap(),
    };
    println!("omega = {omega:.6}");
    let (phi, res) = sor_solve(&a, &b, omega, &vec![0.0; 6], opts.tol, opts.max_sweeps).unwrap();
    println!("SOR solution:");
    for pi in &phi {
        println!("{pi:.6}");
    }
    println!("residual norm = {res:.2e}");
    println!("reference solution: {:?}", reference_solve(&a, &b));
}
