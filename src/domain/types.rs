//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - built once by the parser and then only read
//! - turned into string tables for CSV export
//! - serialized into sweep JSON files

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::UnitPrefix;

/// Field delimiter of analyzer exports.
pub const FIELD_DELIMITER: char = ',';

/// First field of a row that starts a new measurement run.
pub const SETUP_TITLE_TAG: &str = "SetupTitle";
/// First field of a test parameter row.
pub const TEST_PARAMETER_TAG: &str = "TestParameter";
/// First field of the column header row.
pub const DATA_NAME_TAG: &str = "DataName";
/// First field of a data row.
pub const DATA_VALUE_TAG: &str = "DataValue";

/// One line of an export, split on the delimiter, every field trimmed.
pub type RawRow = Vec<String>;

/// Parameter name -> value(s), from `TestParameter` rows.
pub type Parameters = BTreeMap<String, ParamValue>;

/// Structured identity resolved for a file (device, die, ...).
pub type Metadata = BTreeMap<String, String>;

/// Value of a `TestParameter` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Scalar(String),
    List(Vec<String>),
}

impl ParamValue {
    /// Build from the fields following the parameter name.
    ///
    /// One trailing field is a scalar; anything else is kept as a list.
    pub fn from_fields(fields: &[String]) -> Self {
        match fields {
            [single] => ParamValue::Scalar(single.clone()),
            many => ParamValue::List(many.to_vec()),
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ParamValue::Scalar(s) => Some(s),
            ParamValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ParamValue::Scalar(_) => None,
            ParamValue::List(v) => Some(v),
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Scalar(s) => write!(f, "{s}"),
            ParamValue::List(v) => write!(f, "[{}]", v.join(", ")),
        }
    }
}

/// Constant string column appended to a table so concatenated blocks stay distinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLabel {
    pub column: String,
    pub value: String,
}

/// Rectangular numeric table of one measurement run.
///
/// Every row holds exactly one value per declared column. Cells that failed
/// numeric coercion (or were absent on a short row) are `NaN`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementTable {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
    label: Option<BlockLabel>,
}

impl MeasurementTable {
    /// Build a table, padding short rows with `NaN` and truncating long ones.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, f64::NAN);
                row
            })
            .collect();
        Self {
            columns,
            rows,
            label: None,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// A table without columns or without rows carries no usable data.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Column count of the view, including an appended label column.
    pub fn width(&self) -> usize {
        self.columns.len() + usize::from(self.appends_label())
    }

    /// Whether the label adds a column instead of overwriting a data column of the same name.
    fn appends_label(&self) -> bool {
        self.label
            .as_ref()
            .is_some_and(|label| self.column_index(&label.column).is_none())
    }

    pub fn label(&self) -> Option<&BlockLabel> {
        self.label.as_ref()
    }

    pub fn with_label(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.label = Some(BlockLabel {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of a named column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx]).collect())
    }

    /// String view for serialization (`NaN` as empty cell).
    ///
    /// The label fills its own column, appended last, or overwrites a data
    /// column carrying the same name.
    pub fn to_view(&self) -> TableView {
        let mut columns = self.columns.clone();
        let label_slot = self.label.as_ref().map(|label| {
            self.column_index(&label.column).unwrap_or_else(|| {
                columns.push(label.column.clone());
                columns.len() - 1
            })
        });

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut cells: Vec<String> = row.iter().map(|&v| format_cell(v)).collect();
                if let (Some(label), Some(slot)) = (&self.label, label_slot) {
                    if slot < cells.len() {
                        cells[slot] = label.value.clone();
                    } else {
                        cells.push(label.value.clone());
                    }
                }
                cells
            })
            .collect();

        TableView { columns, rows }
    }
}

/// Table-shaped string view handed to serializers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    /// Stack views vertically.
    ///
    /// The result carries the union of all columns in first-seen order; cells
    /// of columns a view does not have are left empty.
    pub fn concat(views: &[TableView]) -> TableView {
        let mut columns: Vec<String> = Vec::new();
        for view in views {
            for col in &view.columns {
                if !columns.contains(col) {
                    columns.push(col.clone());
                }
            }
        }

        let mut rows = Vec::new();
        for view in views {
            let positions: Vec<Option<usize>> = columns
                .iter()
                .map(|c| view.columns.iter().position(|vc| vc == c))
                .collect();
            for row in &view.rows {
                rows.push(
                    positions
                        .iter()
                        .map(|p| p.and_then(|i| row.get(i).cloned()).unwrap_or_default())
                        .collect(),
                );
            }
        }

        TableView { columns, rows }
    }

}

fn format_cell(v: f64) -> String {
    if v.is_nan() { String::new() } else { format!("{v}") }
}

/// One logical measurement run of a file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    /// Second field of the `SetupTitle` row; empty for an anonymous block.
    pub title: String,
    pub parameters: Parameters,
    pub table: MeasurementTable,
}

/// Which rows after the `DataName` header count as data rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RowPolicy {
    /// Every row after the header is data.
    #[default]
    AllAfterHeader,
    /// Only rows tagged `DataValue` are data; other rows are skipped.
    TaggedOnly,
}

/// Whether the resampled fit grid reaches the last independent sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GridEndpoint {
    /// `n` points from the first sample with step `span / n`; the last sample is not reached.
    #[default]
    Exclusive,
    /// `n` evenly spaced points including both end samples.
    Inclusive,
}

/// Sweep flavour: which polynomial gets fitted and what is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SweepKind {
    /// Drain IV sweep: linear fit, resistance.
    Iv,
    /// Gate sweep: parabolic fit, charge-neutrality point.
    Gate,
}

impl SweepKind {
    pub fn degree(self) -> usize {
        match self {
            SweepKind::Iv => 1,
            SweepKind::Gate => 2,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SweepKind::Iv => "IV sweep",
            SweepKind::Gate => "Gate sweep",
        }
    }

    /// Default `(voltage, current)` column names.
    pub fn default_columns(self) -> (&'static str, &'static str) {
        match self {
            SweepKind::Iv => ("DrainV", "DrainI"),
            SweepKind::Gate => ("GateV", "DrainI"),
        }
    }

    pub fn metric_kind(self) -> MetricKind {
        match self {
            SweepKind::Iv => MetricKind::Resistance,
            SweepKind::Gate => MetricKind::DiracPoint,
        }
    }
}

/// Physical quantity derived from fit coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Resistance,
    DiracPoint,
}

impl MetricKind {
    pub fn display_name(self) -> &'static str {
        match self {
            MetricKind::Resistance => "Resistance",
            MetricKind::DiracPoint => "Dirac point",
        }
    }

    /// Base SI unit symbol.
    pub fn unit(self) -> &'static str {
        match self {
            MetricKind::Resistance => "Ohm",
            MetricKind::DiracPoint => "V",
        }
    }
}

/// Derived metric in base SI units. Non-finite when the leading coefficient is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetric {
    pub kind: MetricKind,
    pub value: f64,
}

impl DerivedMetric {
    pub fn is_defined(&self) -> bool {
        self.value.is_finite()
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub files: Vec<PathBuf>,
    pub kind: SweepKind,
    pub volt_column: String,
    pub curr_column: String,
    pub row_policy: RowPolicy,
    pub grid: GridEndpoint,

    pub volt_unit: UnitPrefix,
    pub curr_unit: UnitPrefix,

    /// Fit the point-wise average of all blocks of a file instead of each block.
    pub average: bool,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    /// Directory receiving `<stem>.csv` / `<stem>.json` per analysed sweep.
    pub export_dir: Option<PathBuf>,
}

impl AnalysisConfig {
    /// Configuration with the sweep kind's default columns and no exports.
    pub fn new(kind: SweepKind, files: Vec<PathBuf>) -> Self {
        let (volt, curr) = kind.default_columns();
        Self {
            files,
            kind,
            volt_column: volt.to_string(),
            curr_column: curr.to_string(),
            row_policy: RowPolicy::default(),
            grid: GridEndpoint::default(),
            volt_unit: UnitPrefix::Base,
            curr_unit: UnitPrefix::Base,
            average: false,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_table_pads_and_truncates_rows() {
        let table = MeasurementTable::new(
            vec!["A".to_string(), "B".to_string()],
            vec![vec![1.0], vec![1.0, 2.0, 3.0]],
        );
        assert_eq!(table.rows()[0].len(), 2);
        assert!(table.rows()[0][1].is_nan());
        assert_eq!(table.rows()[1], vec![1.0, 2.0]);
    }

    #[test]
    fn view_appends_label_and_blanks_nan() {
        let table = MeasurementTable::new(vec!["V".to_string()], vec![vec![f64::NAN], vec![0.5]])
            .with_label("SetupTitle", "run1");
        let view = table.to_view();
        assert_eq!(view.columns, vec!["V", "SetupTitle"]);
        assert_eq!(view.rows[0], vec!["", "run1"]);
        assert_eq!(view.rows[1], vec!["0.5", "run1"]);
        assert_eq!(table.width(), 2);
    }

    #[test]
    fn label_overwrites_same_named_column() {
        let table = MeasurementTable::new(
            vec!["SetupTitle".to_string(), "V".to_string()],
            vec![vec![7.0, 1.0], vec![8.0, 2.0]],
        )
        .with_label("SetupTitle", "run2");
        let view = table.to_view();
        assert_eq!(view.columns, vec!["SetupTitle", "V"]);
        assert_eq!(view.rows[1], vec!["run2", "2"]);
        assert_eq!(table.width(), 2);

        let stacked = TableView::concat(&[view.clone(), view]);
        assert_eq!(stacked.columns.len(), 2);
        assert!(stacked.rows.iter().all(|r| r[0] == "run2"));
    }

    #[test]
    fn concat_unions_columns_in_first_seen_order() {
        let a = TableView {
            columns: vec!["V".to_string(), "I".to_string()],
            rows: vec![vec!["1".to_string(), "2".to_string()]],
        };
        let b = TableView {
            columns: vec!["I".to_string(), "T".to_string()],
            rows: vec![vec!["3".to_string(), "x".to_string()]],
        };
        let c = TableView::concat(&[a, b]);
        assert_eq!(c.columns, vec!["V", "I", "T"]);
        assert_eq!(c.rows[0], vec!["1", "2", ""]);
        assert_eq!(c.rows[1], vec!["", "3", "x"]);
    }

    #[test]
    fn param_value_shape_follows_field_count() {
        let one = ParamValue::from_fields(&["5".to_string()]);
        assert_eq!(one.as_scalar(), Some("5"));
        let many = ParamValue::from_fields(&["a".to_string(), "b".to_string()]);
        assert_eq!(many.as_list().map(|v| v.len()), Some(2));
        assert_eq!(many.to_string(), "[a, b]");
    }
}
