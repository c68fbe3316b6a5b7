//! Command-line parsing for the B1500 sweep analyzer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the parsing/fitting code.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::domain::{GridEndpoint, RowPolicy, UnitPrefix};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "b1500", version, about = "B1500A export parser and sweep fitter")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the blocks and test parameters of each file.
    Blocks(BlocksArgs),
    /// Fit drain current against drain voltage and report the resistance.
    Iv(SweepArgs),
    /// Fit drain current against gate voltage and report the Dirac point.
    Gate(SweepArgs),
}

/// Options for listing blocks.
#[derive(Debug, Parser, Clone)]
pub struct BlocksArgs {
    /// Analyzer export files (CSV).
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Which rows after a `DataName` header count as data rows.
    #[arg(long, value_enum, default_value_t = RowPolicy::AllAfterHeader)]
    pub row_policy: RowPolicy,

    /// Write each file's stacked block tables to `<dir>/<stem>.csv`.
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,
}

/// Options shared by the IV and gate sweeps.
#[derive(Debug, Parser, Clone)]
pub struct SweepArgs {
    /// Analyzer export files (CSV).
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Voltage column (default depends on the sweep).
    #[arg(long, value_name = "COLUMN")]
    pub volt: Option<String>,

    /// Current column.
    #[arg(long, value_name = "COLUMN")]
    pub curr: Option<String>,

    /// Which rows after a `DataName` header count as data rows.
    #[arg(long, value_enum, default_value_t = RowPolicy::AllAfterHeader)]
    pub row_policy: RowPolicy,

    /// Fit curve sampling: exclusive (x0 + i*(xN-x0)/n) or inclusive endpoints.
    #[arg(long, value_enum, default_value_t = GridEndpoint::Exclusive)]
    pub grid: GridEndpoint,

    /// Metric prefix for voltages in the output (p, n, u, m, k, M, G).
    #[arg(long, value_name = "PREFIX")]
    pub volt_unit: Option<UnitPrefix>,

    /// Metric prefix for currents in the output.
    #[arg(long, value_name = "PREFIX")]
    pub curr_unit: Option<UnitPrefix>,

    /// Fit the point-wise mean of all blocks of a file instead of each block.
    #[arg(long)]
    pub average: bool,

    /// Render an ASCII plot in the terminal.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Write `<stem>.csv` and `<stem>.json` per sweep into this directory.
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,
}
