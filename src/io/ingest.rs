//! File ingest: path -> `DataFile`.
//!
//! This module is responsible for the file-level view of an export:
//! - reading rows (`rows`)
//! - segmenting them into blocks (`parse::segment_blocks`)
//! - attaching the metadata resolved for the file name
//!
//! Metadata resolution is injected through `MetadataSource`; the parser never
//! interprets file names itself.

use std::path::{Path, PathBuf};

use log::info;

use crate::domain::{Block, Metadata, Parameters, RowPolicy, TableView};
use crate::error::AnalysisError;
use crate::io::read_rows;
use crate::parse::segment_blocks;

/// Resolves structured identity (device, die, ...) from a file's base name.
pub trait MetadataSource {
    fn lookup(&self, file_name: &str) -> Metadata;
}

/// Attaches no metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMetadata;

impl MetadataSource for NoMetadata {
    fn lookup(&self, _file_name: &str) -> Metadata {
        Metadata::new()
    }
}

/// `DeviceName` = file name without its extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStemMetadata;

impl MetadataSource for FileStemMetadata {
    fn lookup(&self, file_name: &str) -> Metadata {
        let stem = Path::new(file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Metadata::from([("DeviceName".to_string(), stem)])
    }
}

/// A parsed analyzer export.
#[derive(Debug, Clone)]
pub struct DataFile {
    pub path: PathBuf,
    pub file_name: String,
    pub metadata: Metadata,
    /// Blocks with data, in file order.
    pub blocks: Vec<Block>,
}

impl DataFile {
    /// Read and segment a file.
    pub fn load(path: &Path, policy: RowPolicy, metadata: &dyn MetadataSource) -> Result<Self, AnalysisError> {
        let rows = read_rows(path)?;
        let blocks = segment_blocks(&rows, policy);

        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!("'{file_name}': {} block(s)", blocks.len());

        Ok(Self {
            path: path.to_path_buf(),
            metadata: metadata.lookup(&file_name),
            file_name,
            blocks,
        })
    }

    /// Parameters of the first block (empty when there is none).
    pub fn params(&self) -> Parameters {
        self.blocks
            .first()
            .map(|b| b.parameters.clone())
            .unwrap_or_default()
    }

    /// Blocks whose table holds at least one row.
    pub fn data_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| !b.table.is_empty())
    }

    /// All block tables stacked into one view.
    pub fn stacked_table(&self) -> TableView {
        let views: Vec<TableView> = self.data_blocks().map(|b| b.table.to_view()).collect();
        TableView::concat(&views)
    }

    /// Error out when the file holds nothing to analyse.
    pub fn require_data(&self) -> Result<(), AnalysisError> {
        if self.data_blocks().next().is_none() {
            return Err(AnalysisError::MalformedFile(format!(
                "'{}' contains no DataName header followed by data rows",
                self.file_name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn stem_metadata_strips_extension() {
        let meta = FileStemMetadata.lookup("D12_R3_IV.csv");
        assert_eq!(meta["DeviceName"], "D12_R3_IV");
        assert!(NoMetadata.lookup("x.csv").is_empty());
    }

    #[test]
    fn load_single_block_file() {
        let file = write_temp("TestParameter,Hold,0.1\nDataName,DrainV,DrainI\nDataValue,0,0\nDataValue,1,2\n");
        let data = DataFile::load(file.path(), RowPolicy::AllAfterHeader, &FileStemMetadata).unwrap();
        assert_eq!(data.blocks.len(), 1);
        assert_eq!(data.params()["Hold"].as_scalar(), Some("0.1"));
        let stem = file.path().file_stem().unwrap().to_string_lossy();
        assert_eq!(data.metadata["DeviceName"], stem);
        assert_eq!(data.stacked_table().rows.len(), 2);
        data.require_data().unwrap();
    }

    #[test]
    fn header_less_file_has_no_data() {
        let file = write_temp("SetupTitle,only\nTestParameter,a,1\n");
        let data = DataFile::load(file.path(), RowPolicy::AllAfterHeader, &NoMetadata).unwrap();
        assert_eq!(data.blocks.len(), 1);
        assert_eq!(data.params()["a"].as_scalar(), Some("1"));
        assert_eq!(data.data_blocks().count(), 0);
        assert!(matches!(data.require_data(), Err(AnalysisError::MalformedFile(_))));
    }
}
