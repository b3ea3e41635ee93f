// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Gridwall Contributors.

//! Gridwall CLI

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use gridwall::geometry::analyze;
use gridwall::io::StlFormat;
use gridwall::{convert_map_file, ConversionError, ConvertConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "gridwall")]
#[command(about = "Convert an occupancy-grid map into an STL wall mesh", long_about = None)]
struct Cli {
    /// Map image to convert (metadata is read from the matching .yaml)
    #[arg(long, alias = "map_dir", value_name = "FILE")]
    map_dir: PathBuf,

    /// Mesh output directory
    #[arg(long, alias = "export_dir", value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// Metadata file, if not next to the map image
    #[arg(long, value_name = "FILE")]
    metadata: Option<PathBuf>,

    /// Intensities at or below this value are walls (0-255)
    #[arg(short, long)]
    threshold: Option<u8>,

    /// Wall height in world units
    #[arg(long)]
    height: Option<f64>,

    /// Configuration file (defaults to ./gridwall.toml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write ASCII STL instead of binary
    #[arg(long)]
    ascii: bool,

    /// Build prisms on a single thread
    #[arg(long)]
    sequential: bool,

    /// Write mesh statistics as JSON
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Exit status for a map with no occupied cells
const EXIT_EMPTY_OCCUPANCY: u8 = 2;
/// Exit status for every other failure, including bad invocations
const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(usage_exit_code(&err));
        }
    };

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            ExitCode::from(failure_exit_code(&err))
        }
    }
}

/// clap exits with 2 on usage errors, which would collide with
/// [`EXIT_EMPTY_OCCUPANCY`].
fn usage_exit_code(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => EXIT_FAILURE,
    }
}

fn failure_exit_code(err: &anyhow::Error) -> u8 {
    let empty = err
        .downcast_ref::<ConversionError>()
        .is_some_and(ConversionError::is_empty_occupancy);
    if empty {
        EXIT_EMPTY_OCCUPANCY
    } else {
        EXIT_FAILURE
    }
}

fn load_config(cli: &Cli) -> Result<ConvertConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = ConvertConfig::from_file(path)?;
            config.apply_env()?;
            config
        }
        None => ConvertConfig::load()?,
    };

    if let Some(export_dir) = &cli.export_dir {
        config.export_dir = export_dir.clone();
    }
    if let Some(threshold) = cli.threshold {
        config.threshold = threshold;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if cli.ascii {
        config.format = StlFormat::Ascii;
    }
    if cli.sequential {
        config.parallel = false;
    }

    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    log::debug!("Configuration: {:?}", config);

    let start = std::time::Instant::now();
    let output = convert_map_file(&cli.map_dir, cli.metadata.as_deref(), &config)?;
    let elapsed = start.elapsed();

    let stats = analyze(&output.mesh);

    if let Some(report) = &cli.report {
        let json = serde_json::to_string_pretty(&stats)?;
        std::fs::write(report, json)
            .with_context(|| format!("Failed to write report: {}", report.display()))?;
    }

    println!(
        "{} {} -> {}",
        "Conversion done:".green().bold(),
        cli.map_dir.display(),
        output.output_path.display().to_string().cyan()
    );
    if cli.verbose {
        println!("  {} {:.2?}", "Time:".bright_black(), elapsed);
        println!("  {} {}", "Vertices:".bright_black(), stats.vertex_count);
        println!("  {} {}", "Triangles:".bright_black(), stats.triangle_count);
        println!(
            "  {} {:.3} x {:.3} x {:.3}",
            "Size:".bright_black(),
            stats.bbox[3] - stats.bbox[0],
            stats.bbox[4] - stats.bbox[1],
            stats.bbox[5] - stats.bbox[2]
        );
    }

    Ok(())
}
