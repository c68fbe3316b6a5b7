//! Error types.
//!
//! - `AnalysisError` is what the parsing/fitting core returns.
//! - `AppError` is what the binary reports: a message plus the process exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the parser, fitter and unit rescaler.
///
/// Numeric coercion failures never show up here: they become `NaN` cells.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The input file could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file parsed, but holds no measurement block usable for the request.
    #[error("Malformed file: {0}")]
    MalformedFile(String),

    /// Requested columns are missing, or series lengths disagree.
    #[error("Data shape error: {0}")]
    DataShape(String),

    /// Not enough information in the independent variable for the fit degree.
    #[error("Underdetermined degree-{degree} fit ({points} usable points): {reason}")]
    UnderdeterminedFit {
        degree: usize,
        points: usize,
        reason: String,
    },

    /// Rescale axis other than voltage/current.
    #[error("Invalid axis '{0}': expected 'V' (voltage) or 'I' (current)")]
    InvalidAxis(String),

    /// Metric prefix outside p, n, u, m, (none), k, M, G.
    #[error("Unknown unit prefix '{0}': expected one of p, n, u, m, k, M, G or empty")]
    UnknownUnit(String),

    /// The least-squares system could not be solved.
    #[error("Least squares solve failed: {0}")]
    Solve(String),

    /// Writing an export failed.
    #[error("Export failed: {0}")]
    Export(String),
}

impl AnalysisError {
    pub fn underdetermined(degree: usize, points: usize, reason: impl Into<String>) -> Self {
        Self::UnderdeterminedFit {
            degree,
            points,
            reason: reason.into(),
        }
    }

    /// Exit code used when this error aborts the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            AnalysisError::Io { .. }
            | AnalysisError::InvalidAxis(_)
            | AnalysisError::UnknownUnit(_)
            | AnalysisError::Export(_) => 2,
            AnalysisError::MalformedFile(_) | AnalysisError::DataShape(_) => 3,
            AnalysisError::UnderdeterminedFit { .. } | AnalysisError::Solve(_) => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
