//! Dataset Distribution CLI
//!
//! Prints the per-class sample distribution of each configured dataset split
//! and saves one bar chart per split.
//!
//! ```text
//! dataset_distribution                       # lists under ./data
//! dataset_distribution --data-path custom_data_dir
//! dataset_distribution --config analysis.toml --json summary.json
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::{debug, info};

use dataset_distribution::utils::logging::{init_logging, LogConfig, LogLevel};
use dataset_distribution::{
    run_analysis, AnalysisConfig, ChartCapability, ChartFormat, DistributionReporter,
};

/// Analyzes and visualizes the class distribution of a dataset
///
/// Reads trainval_data_list.txt and test_data_list.txt from the data
/// directory, prints the number of samples per class for each split and
/// saves a bar chart per split.
#[derive(Parser, Debug)]
#[command(name = "dataset_distribution")]
#[command(version)]
#[command(about = "Analyzes and visualizes the class distribution of a dataset")]
struct Cli {
    /// Directory containing the data list files [default: data]
    #[arg(short, long, alias = "data_path")]
    data_path: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for chart files [default: current directory]
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Chart image format (png, svg)
    #[arg(long)]
    chart_format: Option<ChartFormat>,

    /// Skip chart generation
    #[arg(long, default_value = "false")]
    no_chart: bool,

    /// Write a JSON summary of all splits to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, default_value = "false", conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, default_value = "false")]
    quiet: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut log_config = if cli.verbose {
        LogConfig::verbose()
    } else if cli.quiet {
        LogConfig::quiet()
    } else {
        LogConfig::default()
    };
    if let Some(level) = &cli.log_level {
        log_config = log_config.with_level(LogLevel::parse(level));
    }

    let _ = init_logging(&log_config);

    let config = load_config(&cli)?;
    config.validate().context("Invalid configuration")?;
    debug!("Configuration: {:?}", config);

    // Resolved once; every split sees the same capability.
    let charts = ChartCapability::detect(&config.chart);
    if let Some(warning) = charts.warning() {
        println!("{}", warning.yellow());
        println!();
    }
    if charts.is_available() {
        fs::create_dir_all(&config.output_dir).with_context(|| {
            format!("Failed to create output directory {}", config.output_dir.display())
        })?;
    }

    let data_dir = std::env::current_dir()
        .map(|cwd| cwd.join(&config.data_path))
        .unwrap_or_else(|_| config.data_path.clone());
    println!("Starting dataset analysis in: {}\n", data_dir.display());
    println!("Using dynamic class discovery - classes will be found while reading data files\n");

    let reporter = DistributionReporter::new(config.report_options(), charts);

    let summary = {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let summary = run_analysis(&config, &reporter, &mut out)?;
        out.flush()?;
        summary
    };

    if let Some(path) = &cli.json {
        summary
            .write_json(path)
            .with_context(|| format!("Failed to write summary to {}", path.display()))?;
        println!("--> Saved summary to '{}'\n", path.display());
    }

    info!("Analyzed {} splits", summary.splits.len());
    println!("{}", "--- Analysis complete. ---".green());

    Ok(())
}

/// Start from the config file (or defaults) and apply command-line overrides
fn load_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::load(path)
            .with_context(|| format!("Could not load configuration from {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    if let Some(data_path) = &cli.data_path {
        config.data_path = data_path.clone();
    }
    if let Some(output_dir) = &cli.output_dir {
        config.output_dir = output_dir.clone();
    }
    if let Some(format) = cli.chart_format {
        config.chart.format = format;
    }
    if cli.no_chart {
        config.chart.enabled = false;
    }

    Ok(config)
}
