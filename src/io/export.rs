//! Export table views to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::path::Path;

use log::info;

use crate::domain::TableView;
use crate::error::AnalysisError;

/// Write a table view to a CSV file.
pub fn write_table_csv(path: &Path, view: &TableView) -> Result<(), AnalysisError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AnalysisError::Export(format!("Failed to create CSV '{}': {e}", path.display())))?;
    write_view(&mut writer, view)?;
    writer
        .flush()
        .map_err(|e| AnalysisError::Export(format!("Failed to flush CSV '{}': {e}", path.display())))?;
    info!("wrote {} rows to '{}'", view.rows.len(), path.display());
    Ok(())
}

fn write_view<W: std::io::Write>(writer: &mut csv::Writer<W>, view: &TableView) -> Result<(), AnalysisError> {
    writer
        .write_record(&view.columns)
        .map_err(|e| AnalysisError::Export(format!("Failed to write CSV header: {e}")))?;
    for row in &view.rows {
        writer
            .write_record(row)
            .map_err(|e| AnalysisError::Export(format!("Failed to write CSV row: {e}")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_then_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.csv");
        let view = TableView {
            columns: vec!["Volts (mV)".to_string(), "Current (uA)".to_string()],
            rows: vec![
                vec!["1".to_string(), "".to_string()],
                vec!["2".to_string(), "0.5".to_string()],
            ],
        };
        write_table_csv(&path, &view).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "Volts (mV),Current (uA)\n1,\n2,0.5\n");
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let view = TableView {
            columns: vec!["V".to_string()],
            rows: vec![vec!["3".to_string()]],
        };
        write_table_csv(&path, &view).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "V\n3\n");
    }
}
