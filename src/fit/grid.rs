//! Resampling grid for fitted curves.
//!
//! The grid has the same cardinality as the input sweep and runs from the
//! first to the last fitted sample, so descending sweeps produce descending
//! grids. See `GridEndpoint` for whether the last sample is reached.

use crate::domain::GridEndpoint;

/// `(start, end)` of the grid for samples in sweep order.
///
/// A closed loop sweep (first sample equals last) would give an empty span,
/// so it falls back to `(min, max)`. Returns `None` for an empty slice.
pub fn grid_bounds(xs: &[f64]) -> Option<(f64, f64)> {
    let (&first, &last) = (xs.first()?, xs.last()?);
    if first != last {
        return Some((first, last));
    }
    let (min, max) = xs
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    Some((min, max))
}

/// `n` grid points from `start` towards `end`.
pub fn resample_grid(start: f64, end: f64, n: usize, endpoint: GridEndpoint) -> Vec<f64> {
    match (endpoint, n) {
        (_, 0) => Vec::new(),
        (GridEndpoint::Inclusive, 1) => vec![start],
        (GridEndpoint::Exclusive, _) => {
            let step = (end - start) / n as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
        (GridEndpoint::Inclusive, _) => {
            let step = (end - start) / (n as f64 - 1.0);
            (0..n)
                .map(|i| if i + 1 == n { end } else { start + step * i as f64 })
                .collect()
        }
    }
}
