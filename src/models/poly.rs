//! Polynomial model evaluation.
//!
//! The fitter relies on two primitive operations:
//! - build a design row for a given `x` and degree (for OLS)
//! - predict `y(x)` given coefficients (for fit curves and residuals)
//!
//! Coefficients are ordered highest power first, so a degree-2 model is
//! `[a, b, c]` for `a*x^2 + b*x + c`.

/// Fill a Vandermonde design row, highest power first.
///
/// # Panics
/// Panics if `out` does not have length `degree + 1`. Callers should size
/// these arrays correctly.
pub fn fill_design_row(degree: usize, x: f64, out: &mut [f64]) {
    assert_eq!(out.len(), degree + 1, "design row length must be degree + 1");
    let mut power = 1.0;
    for slot in out.iter_mut().rev() {
        *slot = power;
        power *= x;
    }
}

/// Evaluate the polynomial at `x` (Horner's scheme).
pub fn predict(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn design_row_is_highest_power_first() {
        let mut row = [0.0; 3];
        fill_design_row(2, 3.0, &mut row);
        assert_eq!(row, [9.0, 3.0, 1.0]);
    }

    #[test]
    fn predict_matches_expanded_form() {
        let coeffs = [2.0, -1.0, 0.5];
        let x = 1.5;
        let y = predict(&coeffs, x);
        assert!((y - (2.0 * x * x - x + 0.5)).abs() < 1e-12);
        assert_eq!(predict(&[], x), 0.0);
    }
}
