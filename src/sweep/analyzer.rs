//! Sweep analyzer: table columns -> polynomial fit -> derived metric.
//!
//! - IV sweep: degree-1 fit, resistance = `1 / slope`
//! - Gate sweep: degree-2 fit, Dirac point = `-b / (2a)`
//!
//! A zero leading coefficient is not an error; the metric is then non-finite.

use serde::{Deserialize, Serialize};

use crate::domain::{
    Axis, Block, DerivedMetric, GridEndpoint, MeasurementTable, MetricKind, SweepKind, TableView, UnitPrefix,
};
use crate::error::AnalysisError;
use crate::fit::{PolyFit, finite_pairs, fit_polynomial, grid_bounds, resample_grid};

/// Fitted curve resampled over the independent variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FitCurve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Fit outcome of one sweep.
///
/// Coefficients and the derived metric stay in base SI units. The series and
/// the fit curve follow the axis prefixes set through `change_units`.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    pub(super) kind: SweepKind,
    pub(super) title: String,
    pub(super) voltage: Vec<f64>,
    pub(super) current: Vec<f64>,
    pub(super) fit: PolyFit,
    pub(super) metric: DerivedMetric,
    pub(super) fit_curve: FitCurve,
    pub(super) voltage_unit: UnitPrefix,
    pub(super) current_unit: UnitPrefix,
}

impl SweepResult {
    /// Fit a sweep from base-unit series.
    pub fn from_series(
        kind: SweepKind,
        title: impl Into<String>,
        voltage: Vec<f64>,
        current: Vec<f64>,
        grid: GridEndpoint,
    ) -> Result<Self, AnalysisError> {
        let fit = fit_polynomial(&voltage, &current, kind.degree())?;
        let metric = derive_metric(kind, &fit.coefficients);

        let (fitted_x, _) = finite_pairs(&voltage, &current);
        let fit_curve = match grid_bounds(&fitted_x) {
            Some((start, end)) => {
                let x = resample_grid(start, end, voltage.len(), grid);
                let y = x.iter().map(|&v| fit.predict(v)).collect();
                FitCurve { x, y }
            }
            None => FitCurve::default(),
        };

        Ok(Self {
            kind,
            title: title.into(),
            voltage,
            current,
            fit,
            metric,
            fit_curve,
            voltage_unit: UnitPrefix::Base,
            current_unit: UnitPrefix::Base,
        })
    }

    pub fn kind(&self) -> SweepKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Independent series (volts, scaled by `voltage_unit`).
    pub fn voltage(&self) -> &[f64] {
        &self.voltage
    }

    /// Dependent series (amps, scaled by `current_unit`).
    pub fn current(&self) -> &[f64] {
        &self.current
    }

    pub fn fit(&self) -> &PolyFit {
        &self.fit
    }

    /// Highest power first, base units.
    pub fn coefficients(&self) -> &[f64] {
        &self.fit.coefficients
    }

    pub fn metric(&self) -> DerivedMetric {
        self.metric
    }

    pub fn fit_curve(&self) -> &FitCurve {
        &self.fit_curve
    }

    pub fn voltage_unit(&self) -> UnitPrefix {
        self.voltage_unit
    }

    pub fn current_unit(&self) -> UnitPrefix {
        self.current_unit
    }

    pub fn unit(&self, axis: Axis) -> UnitPrefix {
        match axis {
            Axis::Voltage => self.voltage_unit,
            Axis::Current => self.current_unit,
        }
    }

    /// Axis label such as `Volts (mV)`.
    pub fn axis_label(&self, axis: Axis) -> String {
        let name = match axis {
            Axis::Voltage => "Volts",
            Axis::Current => "Current",
        };
        format!("{name} ({}{})", self.unit(axis), axis.unit())
    }

    /// Reduced two-column view of the raw series for export.
    pub fn to_view(&self) -> TableView {
        TableView {
            columns: vec![self.axis_label(Axis::Voltage), self.axis_label(Axis::Current)],
            rows: self
                .voltage
                .iter()
                .zip(&self.current)
                .map(|(v, i)| vec![format_value(*v), format_value(*i)])
                .collect(),
        }
    }
}

fn format_value(v: f64) -> String {
    if v.is_nan() { String::new() } else { format!("{v}") }
}

/// Compute the derived metric from coefficients (highest power first).
///
/// Too few coefficients for the sweep's degree give an undefined (`NaN`) metric.
pub(crate) fn derive_metric(kind: SweepKind, coefficients: &[f64]) -> DerivedMetric {
    let value = match (kind.metric_kind(), coefficients) {
        (MetricKind::Resistance, [slope, _, ..]) => 1.0 / slope,
        (MetricKind::DiracPoint, [a, b, _, ..]) => -b / (2.0 * a),
        _ => f64::NAN,
    };
    DerivedMetric {
        kind: kind.metric_kind(),
        value,
    }
}

/// Column selection and fit options for one sweep kind.
#[derive(Debug, Clone)]
pub struct SweepAnalyzer {
    pub kind: SweepKind,
    pub voltage_column: String,
    pub current_column: String,
    pub grid: GridEndpoint,
}

impl SweepAnalyzer {
    /// Analyzer using the kind's default columns.
    pub fn new(kind: SweepKind) -> Self {
        let (volt, curr) = kind.default_columns();
        Self {
            kind,
            voltage_column: volt.to_string(),
            current_column: curr.to_string(),
            grid: GridEndpoint::default(),
        }
    }

    pub fn with_columns(mut self, voltage: impl Into<String>, current: impl Into<String>) -> Self {
        self.voltage_column = voltage.into();
        self.current_column = current.into();
        self
    }

    pub fn with_grid(mut self, grid: GridEndpoint) -> Self {
        self.grid = grid;
        self
    }

    /// Pull the `(voltage, current)` series out of a table.
    pub fn extract(&self, table: &MeasurementTable) -> Result<(Vec<f64>, Vec<f64>), AnalysisError> {
        let voltage = lookup(table, &self.voltage_column)?;
        let current = lookup(table, &self.current_column)?;
        if voltage.len() != current.len() {
            return Err(AnalysisError::DataShape(format!(
                "'{}' has {} values, '{}' has {}",
                self.voltage_column,
                voltage.len(),
                self.current_column,
                current.len()
            )));
        }
        Ok((voltage, current))
    }

    pub fn analyze(&self, table: &MeasurementTable) -> Result<SweepResult, AnalysisError> {
        self.analyze_titled(table, "")
    }

    pub fn analyze_block(&self, block: &Block) -> Result<SweepResult, AnalysisError> {
        self.analyze_titled(&block.table, &block.title)
    }

    fn analyze_titled(&self, table: &MeasurementTable, title: &str) -> Result<SweepResult, AnalysisError> {
        let (voltage, current) = self.extract(table)?;
        SweepResult::from_series(self.kind, title, voltage, current, self.grid)
    }
}

fn lookup(table: &MeasurementTable, name: &str) -> Result<Vec<f64>, AnalysisError> {
    table.column(name).ok_or_else(|| {
        AnalysisError::DataShape(format!(
            "column '{name}' not found (available: {})",
            table.columns().join(", ")
        ))
    })
}
