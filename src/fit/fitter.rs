//! Low-level polynomial fitting.
//!
//! Given:
//! - independent samples `x_i`
//! - dependent samples `y_i`
//! - a degree `d`
//!
//! we solve an OLS problem on the Vandermonde design matrix and return the
//! coefficients (highest power first) together with fit diagnostics.
//!
//! Pairs where either value is non-finite are left out of the fit.

use log::debug;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::math::solve_scaled_least_squares;
use crate::models::{fill_design_row, predict};

/// Fit quality diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    pub r_squared: f64,
    /// Number of pairs that entered the fit.
    pub n: usize,
}

/// Best polynomial for a set of samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolyFit {
    pub degree: usize,
    /// Highest power first.
    pub coefficients: Vec<f64>,
    pub quality: FitQuality,
}

impl PolyFit {
    pub fn predict(&self, x: f64) -> f64 {
        predict(&self.coefficients, x)
    }
}

/// Pairs with both values finite, in input order.
pub fn finite_pairs(x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>) {
    x.iter()
        .zip(y)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .unzip()
}

/// Least squares polynomial fit of `y` on `x`.
pub fn fit_polynomial(x: &[f64], y: &[f64], degree: usize) -> Result<PolyFit, AnalysisError> {
    if x.len() != y.len() {
        return Err(AnalysisError::DataShape(format!(
            "independent series has {} values, dependent series has {}",
            x.len(),
            y.len()
        )));
    }

    let (xs, ys) = finite_pairs(x, y);
    if xs.len() < x.len() {
        debug!("{} non-finite pairs left out of the fit", x.len() - xs.len());
    }

    let n = xs.len();
    let p = degree + 1;
    if n < p {
        return Err(AnalysisError::underdetermined(
            degree,
            n,
            format!("at least {p} points are required"),
        ));
    }

    let (min, max) = xs
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if max - min == 0.0 {
        return Err(AnalysisError::underdetermined(
            degree,
            n,
            "independent variable has zero span",
        ));
    }

    let distinct = count_distinct(&xs);
    if distinct < p {
        return Err(AnalysisError::underdetermined(
            degree,
            n,
            format!("{distinct} distinct independent values, at least {p} are required"),
        ));
    }

    let mut design = DMatrix::<f64>::zeros(n, p);
    let mut row = vec![0.0; p];
    for (i, &xi) in xs.iter().enumerate() {
        fill_design_row(degree, xi, &mut row);
        for (j, &v) in row.iter().enumerate() {
            design[(i, j)] = v;
        }
    }
    let rhs = DVector::from_column_slice(&ys);

    let beta = solve_scaled_least_squares(&design, &rhs).ok_or_else(|| {
        AnalysisError::Solve(format!("degree-{degree} system on {n} points is ill-conditioned"))
    })?;
    let coefficients: Vec<f64> = beta.iter().copied().collect();

    let quality = compute_quality(&coefficients, &xs, &ys);
    Ok(PolyFit {
        degree,
        coefficients,
        quality,
    })
}

fn count_distinct(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}

fn compute_quality(coefficients: &[f64], xs: &[f64], ys: &[f64]) -> FitQuality {
    let n = xs.len();
    let mean = ys.iter().sum::<f64>() / n as f64;

    let mut sse = 0.0;
    let mut sst = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let r = y - predict(coefficients, x);
        sse += r * r;
        sst += (y - mean) * (y - mean);
    }

    let r_squared = if sst > 0.0 { 1.0 - sse / sst } else { 1.0 };
    FitQuality {
        sse,
        rmse: (sse / n as f64).sqrt(),
        r_squared,
        n,
    }
}
