//! Curve fitting.
//!
//! Responsibilities:
//!
//! - least squares polynomial fits with diagnostics (`fitter`)
//! - the resampling grid used to draw/export fitted curves (`grid`)

pub mod fitter;
pub mod grid;

pub use fitter::*;
pub use grid::*;
