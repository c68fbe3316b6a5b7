//! Sweep analysis: fits, derived metrics and unit handling.
//!
//! - `analyzer`: IV / gate fits on a measurement table
//! - `rescale`: idempotent metric-prefix rescaling of a fitted sweep
//! - `average`: one fit over the point-wise mean of repeated runs

pub mod analyzer;
pub mod average;
pub mod rescale;

pub use analyzer::*;
