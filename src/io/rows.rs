//! Row reader: analyzer export -> trimmed field lists.
//!
//! No numeric interpretation happens here. Bytes that are not valid UTF-8 are
//! replaced rather than failing the read, so one bad byte cannot hide an
//! otherwise valid file.

use std::path::Path;

use log::{debug, warn};

use crate::domain::{FIELD_DELIMITER, RawRow};
use crate::error::AnalysisError;

/// Read a file into rows.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>, AnalysisError> {
    let bytes = std::fs::read(path).map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let text = String::from_utf8_lossy(&bytes);
    if matches!(text, std::borrow::Cow::Owned(_)) {
        warn!(
            "'{}' is not valid UTF-8; undecodable bytes were replaced",
            path.display()
        );
    }

    let rows = split_rows(&text);
    debug!("read {} rows from '{}'", rows.len(), path.display());
    Ok(rows)
}

/// Split text into rows of trimmed fields.
pub fn split_rows(text: &str) -> Vec<RawRow> {
    // Spreadsheet tools like to prefix UTF-8 exports with a BOM, which would
    // otherwise hide the marker tag of the first row.
    let text = text.trim_start_matches('\u{feff}');
    text.lines()
        .map(|line| {
            line.split(FIELD_DELIMITER)
                .map(|field| field.trim().to_string())
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn fields_are_trimmed_and_terminators_stripped() {
        let rows = split_rows("SetupTitle, I/V Sweep \r\nDataName,  DrainV ,DrainI\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["SetupTitle", "I/V Sweep"]);
        assert_eq!(rows[1], vec!["DataName", "DrainV", "DrainI"]);
    }

    #[test]
    fn bom_does_not_hide_first_tag() {
        let rows = split_rows("\u{feff}DataName,V\nDataValue,1\n");
        assert_eq!(rows[0][0], "DataName");
    }

    #[test]
    fn invalid_utf8_is_tolerated() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"DataName,V\xff,I\nDataValue,1,2\n").unwrap();
        let rows = read_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["DataValue", "1", "2"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_rows(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, AnalysisError::Io { .. }));
    }
}
