//! Table builder: `DataName` header + data rows -> numeric table.
//!
//! The builder is total. A range without a header row, or whose header is the
//! last row, yields an empty table; unparsable cells yield `NaN`.
//!
//! Column mapping is positional against the *whole* header row, tag cell
//! included. The data rows' own tag cell (`DataValue`) therefore lines up with
//! the header's `DataName` cell, and that column is dropped from the result.

use crate::domain::{DATA_NAME_TAG, DATA_VALUE_TAG, MeasurementTable, RawRow, RowPolicy};
use crate::parse::is_tagged;

/// Output columns and the header position each one is read from.
#[derive(Debug, Clone, Default)]
struct ColumnLayout {
    names: Vec<String>,
    sources: Vec<usize>,
}

impl ColumnLayout {
    /// One column per distinct header name.
    ///
    /// A repeated name keeps the position of its first occurrence in the output
    /// but reads values from its last occurrence. The `DataName` tag column and
    /// blank header cells (trailing delimiters) are not data channels.
    fn from_header(header: &RawRow) -> Self {
        let mut layout = ColumnLayout::default();
        for (pos, name) in header.iter().enumerate() {
            if name == DATA_NAME_TAG || name.is_empty() {
                continue;
            }
            match layout.names.iter().position(|n| n == name) {
                Some(idx) => layout.sources[idx] = pos,
                None => {
                    layout.names.push(name.clone());
                    layout.sources.push(pos);
                }
            }
        }
        layout
    }

    fn extract(&self, row: &RawRow) -> Vec<f64> {
        self.sources
            .iter()
            .map(|&pos| row.get(pos).map_or(f64::NAN, |cell| coerce_cell(cell)))
            .collect()
    }
}

/// Build the measurement table of a row range.
pub fn build_table(rows: &[RawRow], policy: RowPolicy) -> MeasurementTable {
    let Some(header_idx) = rows.iter().position(|row| is_tagged(row, DATA_NAME_TAG)) else {
        return MeasurementTable::empty();
    };
    if header_idx + 1 == rows.len() {
        return MeasurementTable::empty();
    }

    let layout = ColumnLayout::from_header(&rows[header_idx]);
    let data = rows[header_idx + 1..]
        .iter()
        .filter(|row| is_data_row(row, policy))
        .map(|row| layout.extract(row))
        .collect();

    MeasurementTable::new(layout.names, data)
}

fn is_data_row(row: &RawRow, policy: RowPolicy) -> bool {
    match policy {
        RowPolicy::AllAfterHeader => true,
        RowPolicy::TaggedOnly => is_tagged(row, DATA_VALUE_TAG),
    }
}

/// Parse a cell as `f64`, `NaN` when it is not a number.
pub fn coerce_cell(cell: &str) -> f64 {
    cell.trim().parse::<f64>().unwrap_or(f64::NAN)
}
