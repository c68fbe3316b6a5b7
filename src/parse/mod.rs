//! Sectioned-file parsing.
//!
//! An analyzer export is a flat list of rows whose first field tags the row's
//! role. This module turns such a list into `Block`s:
//!
//! - `segment`: split on `SetupTitle` rows into runs (`segment_blocks`)
//! - `table`: `DataName` header + following rows -> `MeasurementTable`
//! - `params`: `TestParameter` rows -> `Parameters`

pub mod params;
pub mod segment;
pub mod table;

pub use params::*;
pub use segment::*;
pub use table::*;

use crate::domain::RawRow;

/// Whether the row's first field equals `tag`.
pub(crate) fn is_tagged(row: &RawRow, tag: &str) -> bool {
    row.first().is_some_and(|first| first == tag)
}
