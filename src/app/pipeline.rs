//! Shared analysis pipeline used by the CLI subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! read -> segment -> fit per block (or averaged) -> rescale -> export
//!
//! Files are independent, so a batch is processed in parallel with rayon.

use std::path::{Path, PathBuf};

use log::info;
use rayon::prelude::*;

use crate::domain::{AnalysisConfig, Axis, RowPolicy};
use crate::error::AnalysisError;
use crate::io::{DataFile, FileStemMetadata, SweepFile, write_sweep_json, write_table_csv};
use crate::sweep::{SweepAnalyzer, SweepResult};

/// All computed outputs for one input file.
#[derive(Debug, Clone)]
pub struct FileOutput {
    pub file: DataFile,
    pub sweeps: Vec<SweepResult>,
    /// Files written into the export directory, in write order.
    pub exported: Vec<PathBuf>,
}

/// Load and segment several files in parallel, preserving input order.
pub fn load_files(files: &[PathBuf], policy: RowPolicy) -> Result<Vec<DataFile>, AnalysisError> {
    files
        .par_iter()
        .map(|path| DataFile::load(path, policy, &FileStemMetadata))
        .collect()
}

/// Run the configured sweep analysis over every file.
pub fn run_analysis(config: &AnalysisConfig) -> Result<Vec<FileOutput>, AnalysisError> {
    config
        .files
        .par_iter()
        .map(|path| analyze_file(path, config))
        .collect()
}

/// Analyse one file: every data block, or their average when requested.
pub fn analyze_file(path: &Path, config: &AnalysisConfig) -> Result<FileOutput, AnalysisError> {
    let file = DataFile::load(path, config.row_policy, &FileStemMetadata)?;
    file.require_data()?;

    let analyzer = SweepAnalyzer::new(config.kind)
        .with_columns(config.volt_column.clone(), config.curr_column.clone())
        .with_grid(config.grid);

    let mut sweeps = if config.average {
        let tables: Vec<_> = file.data_blocks().map(|b| &b.table).collect();
        vec![analyzer.analyze_average(&tables)?]
    } else {
        file.data_blocks()
            .map(|block| analyzer.analyze_block(block))
            .collect::<Result<Vec<_>, _>>()?
    };

    for sweep in &mut sweeps {
        sweep.change_units(Axis::Voltage, config.volt_unit);
        sweep.change_units(Axis::Current, config.curr_unit);
    }
    info!("'{}': {} sweep(s) fitted", file.file_name, sweeps.len());

    let exported = match &config.export_dir {
        Some(dir) => export_sweeps(dir, &file, &sweeps, config)?,
        None => Vec::new(),
    };

    Ok(FileOutput {
        file,
        sweeps,
        exported,
    })
}

/// Write the stacked block tables of a file to `<dir>/<stem>.csv`.
pub fn export_blocks(dir: &Path, file: &DataFile) -> Result<PathBuf, AnalysisError> {
    create_export_dir(dir)?;
    let path = dir.join(format!("{}.csv", file_stem(file)));
    write_table_csv(&path, &file.stacked_table())?;
    Ok(path)
}

fn export_sweeps(
    dir: &Path,
    file: &DataFile,
    sweeps: &[SweepResult],
    config: &AnalysisConfig,
) -> Result<Vec<PathBuf>, AnalysisError> {
    create_export_dir(dir)?;
    let stem = file_stem(file);
    let blocks: Vec<_> = file.data_blocks().collect();
    let mut written = Vec::with_capacity(sweeps.len() * 2);

    for (idx, sweep) in sweeps.iter().enumerate() {
        let name = if sweeps.len() == 1 {
            stem.clone()
        } else {
            format!("{stem}_{}", idx + 1)
        };

        let csv_path = dir.join(format!("{name}.csv"));
        write_table_csv(&csv_path, &sweep.to_view())?;
        written.push(csv_path);

        let json_path = dir.join(format!("{name}.json"));
        // Averaged sweeps span every block; they carry the file's parameters.
        let parameters = match blocks.get(idx) {
            Some(block) if !config.average => block.parameters.clone(),
            _ => file.params(),
        };
        let doc = SweepFile::new(
            sweep,
            &file.file_name,
            &file.metadata,
            parameters,
            &config.volt_column,
            &config.curr_column,
        );
        write_sweep_json(&json_path, &doc)?;
        written.push(json_path);
    }

    Ok(written)
}

fn file_stem(file: &DataFile) -> String {
    file.path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "export".to_string())
}

fn create_export_dir(dir: &Path) -> Result<(), AnalysisError> {
    std::fs::create_dir_all(dir).map_err(|source| AnalysisError::Io {
        path: dir.to_path_buf(),
        source,
    })
}
