//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initialises logging
//! - parses CLI arguments
//! - runs the analysis pipeline
//! - prints reports/plots

use clap::Parser;
use log::info;

use crate::cli::{BlocksArgs, Cli, Command, SweepArgs};
use crate::domain::{AnalysisConfig, SweepKind, UnitPrefix};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `b1500` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env is fine; it only seeds RUST_LOG and friends.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Blocks(args) => handle_blocks(args),
        Command::Iv(args) => handle_sweep(SweepKind::Iv, args),
        Command::Gate(args) => handle_sweep(SweepKind::Gate, args),
    }
}

fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

fn handle_blocks(args: BlocksArgs) -> Result<(), AppError> {
    let files = pipeline::load_files(&args.files, args.row_policy)?;

    for file in &files {
        println!("{}", crate::report::format_file_summary(file));

        if let Some(dir) = &args.export_dir {
            let path = pipeline::export_blocks(dir, file)?;
            info!("blocks of '{}' written to '{}'", file.file_name, path.display());
        }
    }

    Ok(())
}

fn handle_sweep(kind: SweepKind, args: SweepArgs) -> Result<(), AppError> {
    let config = config_from_args(kind, &args);
    let outputs = pipeline::run_analysis(&config)?;

    for output in &outputs {
        let label = output.file.metadata.get("DeviceName").map(String::as_str);

        for sweep in &output.sweeps {
            println!(
                "{}",
                crate::report::format_sweep_summary(
                    &output.file.file_name,
                    sweep,
                    &config.volt_column,
                    &config.curr_column
                )
            );

            if config.plot {
                let plot = crate::plot::render_sweep_plot(sweep, config.plot_width, config.plot_height, label);
                println!("{plot}");
            }
        }

        for path in &output.exported {
            println!("wrote {}", path.display());
        }
    }

    Ok(())
}

/// Turn CLI flags into the plain pipeline configuration.
pub fn config_from_args(kind: SweepKind, args: &SweepArgs) -> AnalysisConfig {
    let mut config = AnalysisConfig::new(kind, args.files.clone());
    if let Some(volt) = &args.volt {
        config.volt_column = volt.clone();
    }
    if let Some(curr) = &args.curr {
        config.curr_column = curr.clone();
    }
    config.row_policy = args.row_policy;
    config.grid = args.grid;
    config.volt_unit = args.volt_unit.unwrap_or(UnitPrefix::Base);
    config.curr_unit = args.curr_unit.unwrap_or(UnitPrefix::Base);
    config.average = args.average;
    config.plot = args.plot;
    config.plot_width = args.width;
    config.plot_height = args.height;
    config.export_dir = args.export_dir.clone();
    config
}
