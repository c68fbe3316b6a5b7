//! Read/write sweep JSON files.
//!
//! Sweep JSON is the "portable" representation of a fitted sweep:
//! - sweep kind, source file/block and column names
//! - fit coefficients, quality and the derived metric (base SI units)
//! - the axis prefixes in effect plus raw series and fitted grid, for quick plotting
//!
//! The schema is defined by `SweepFile`.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DerivedMetric, Metadata, Parameters, SweepKind};
use crate::error::AnalysisError;
use crate::fit::FitQuality;
use crate::sweep::{FitCurve, SweepResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepFile {
    pub tool: String,
    pub generated: DateTime<Utc>,
    pub source: String,
    pub block: String,
    pub metadata: Metadata,
    /// Test parameters of the source block.
    pub parameters: Parameters,
    pub kind: SweepKind,
    pub voltage_column: String,
    pub current_column: String,
    pub coefficients: Vec<f64>,
    pub quality: FitQuality,
    /// `null` in JSON when undefined (zero leading coefficient).
    pub metric: Option<DerivedMetric>,
    pub voltage_unit: String,
    pub current_unit: String,
    pub voltage: Vec<Option<f64>>,
    pub current: Vec<Option<f64>>,
    pub fit_curve: FitCurve,
}

impl SweepFile {
    pub fn new(
        sweep: &SweepResult,
        source: &str,
        metadata: &Metadata,
        parameters: Parameters,
        voltage_column: &str,
        current_column: &str,
    ) -> Self {
        let metric = sweep.metric();
        Self {
            tool: env!("CARGO_PKG_NAME").to_string(),
            generated: Utc::now(),
            source: source.to_string(),
            block: sweep.title().to_string(),
            metadata: metadata.clone(),
            parameters,
            kind: sweep.kind(),
            voltage_column: voltage_column.to_string(),
            current_column: current_column.to_string(),
            coefficients: sweep.coefficients().to_vec(),
            quality: sweep.fit().quality.clone(),
            metric: metric.is_defined().then_some(metric),
            voltage_unit: sweep.voltage_unit().symbol().to_string(),
            current_unit: sweep.current_unit().symbol().to_string(),
            // JSON has no NaN.
            voltage: sweep.voltage().iter().map(|v| v.is_finite().then_some(*v)).collect(),
            current: sweep.current().iter().map(|v| v.is_finite().then_some(*v)).collect(),
            fit_curve: sweep.fit_curve().clone(),
        }
    }
}

/// Write a sweep JSON file.
pub fn write_sweep_json(path: &Path, sweep: &SweepFile) -> Result<(), AnalysisError> {
    let file = File::create(path)
        .map_err(|e| AnalysisError::Export(format!("Failed to create sweep JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, sweep)
        .map_err(|e| AnalysisError::Export(format!("Failed to write sweep JSON: {e}")))?;

    Ok(())
}

/// Read a sweep JSON file.
pub fn read_sweep_json(path: &Path) -> Result<SweepFile, AnalysisError> {
    let file = File::open(path).map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let sweep: SweepFile = serde_json::from_reader(file)
        .map_err(|e| AnalysisError::MalformedFile(format!("Invalid sweep JSON: {e}")))?;
    Ok(sweep)
}
