//! Averaged fits over repeated runs.
//!
//! Repeated measurements of the same device (several blocks in one export, or
//! several files) share the same voltage steps. The current is averaged point
//! by point and a single curve is fitted on the first run's voltages.

use log::info;

use crate::domain::MeasurementTable;
use crate::error::AnalysisError;
use crate::sweep::{SweepAnalyzer, SweepResult};

impl SweepAnalyzer {
    /// Fit the point-wise mean current of several tables.
    ///
    /// All runs must have the same number of samples.
    pub fn analyze_average(&self, tables: &[&MeasurementTable]) -> Result<SweepResult, AnalysisError> {
        let Some((first, rest)) = tables.split_first() else {
            return Err(AnalysisError::MalformedFile("no runs to average".to_string()));
        };

        let (voltage, mut sum) = self.extract(first)?;
        for (idx, table) in rest.iter().enumerate() {
            let (_, current) = self.extract(table)?;
            if current.len() != sum.len() {
                return Err(AnalysisError::DataShape(format!(
                    "run {} has {} samples, run 1 has {}",
                    idx + 2,
                    current.len(),
                    sum.len()
                )));
            }
            for (acc, v) in sum.iter_mut().zip(current) {
                *acc += v;
            }
        }

        let n = tables.len() as f64;
        let mean: Vec<f64> = sum.into_iter().map(|v| v / n).collect();
        info!("averaging {} runs of {} samples", tables.len(), mean.len());

        SweepResult::from_series(
            self.kind,
            format!("mean of {} runs", tables.len()),
            voltage,
            mean,
            self.grid,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SweepKind;

    fn run(offset: f64) -> MeasurementTable {
        MeasurementTable::new(
            vec!["DrainV".to_string(), "DrainI".to_string()],
            (0..6)
                .map(|i| {
                    let v = i as f64 * 0.1;
                    vec![v, 1e-3 * v + offset]
                })
                .collect(),
        )
    }

    #[test]
    fn average_cancels_symmetric_offsets() {
        let (a, b) = (run(1e-5), run(-1e-5));
        let result = SweepAnalyzer::new(SweepKind::Iv)
            .analyze_average(&[&a, &b])
            .unwrap();
        assert!((result.metric().value - 1000.0).abs() < 1e-6);
        assert!(result.coefficients()[1].abs() < 1e-15);
        assert_eq!(result.title(), "mean of 2 runs");
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let short = MeasurementTable::new(
            vec!["DrainV".to_string(), "DrainI".to_string()],
            vec![vec![0.0, 0.0], vec![1.0, 1.0]],
        );
        let long = run(0.0);
        let err = SweepAnalyzer::new(SweepKind::Iv)
            .analyze_average(&[&long, &short])
            .unwrap_err();
        assert!(matches!(err, AnalysisError::DataShape(_)));
    }

    #[test]
    fn no_runs_is_malformed() {
        let err = SweepAnalyzer::new(SweepKind::Iv).analyze_average(&[]).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedFile(_)));
    }
}
