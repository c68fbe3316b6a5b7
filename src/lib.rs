//! `b1500-sweep` library crate.
//!
//! Parses B1500A semiconductor parameter-analyzer CSV exports into blocks of
//! test parameters and measurement tables, and fits IV / gate sweeps.
//!
//! The binary (`b1500`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the parser and fitter are reusable from other tools

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod parse;
pub mod plot;
pub mod report;
pub mod sweep;
