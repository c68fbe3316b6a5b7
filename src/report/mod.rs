//! Reporting utilities: formatted terminal output for files and sweeps.

pub mod format;

pub use format::*;
