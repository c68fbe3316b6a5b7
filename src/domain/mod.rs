//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw rows and the marker tags that structure an analyzer export
//! - parsed blocks, parameters and numeric measurement tables
//! - sweep configuration enums (`SweepKind`, `RowPolicy`, `GridEndpoint`)
//! - metric prefixes and rescale axes (`units`)

pub mod types;
pub mod units;

pub use types::*;
pub use units::*;
