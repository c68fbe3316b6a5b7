//! Least squares solver.
//!
//! Every fit in this crate is a small linear regression:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! where `x_i` is a Vandermonde row. Implementation choices:
//! - SVD solve, since the design matrix is tall (more rows than columns).
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic for
//!   non-square matrices.)
//! - Columns are scaled to unit 2-norm before the solve. Raw `x^2`, `x` and
//!   `1` columns can differ by orders of magnitude (volts vs. millivolts), and
//!   the SVD tolerance is absolute.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Solve after scaling each column of `x` to unit norm.
///
/// All-zero columns are left unscaled.
pub fn solve_scaled_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let norms: Vec<f64> = x
        .column_iter()
        .map(|col| {
            let n = col.norm();
            if n > 0.0 && n.is_finite() { n } else { 1.0 }
        })
        .collect();

    let mut scaled = x.clone();
    for (j, &n) in norms.iter().enumerate() {
        scaled.column_mut(j).unscale_mut(n);
    }

    let beta = solve_least_squares(&scaled, y)?;
    Some(DVector::from_iterator(
        beta.len(),
        beta.iter().zip(&norms).map(|(b, n)| b / n),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn scaled_solve_handles_mismatched_column_magnitudes() {
        // y = 4e-3 x^2 + 2 on millivolt-scale x.
        let xs = [-2e-3, -1e-3, 0.0, 1e-3, 2e-3];
        let mut data = Vec::new();
        let mut ys = Vec::new();
        for &x in &xs {
            data.extend_from_slice(&[x * x, x, 1.0]);
            ys.push(4e-3 * x * x + 2.0);
        }
        let x = DMatrix::from_row_slice(xs.len(), 3, &data);
        let y = DVector::from_row_slice(&ys);

        let beta = solve_scaled_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 4e-3).abs() < 1e-6);
        assert!(beta[1].abs() < 1e-9);
        assert!((beta[2] - 2.0).abs() < 1e-12);
    }
}
