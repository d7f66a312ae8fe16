//! MPI Trace Studio CLI
//!
//! Converts per-rank MPI event logs into canonical traces and simulates
//! their execution timeline under a configurable network.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use mpi_trace_studio::commands::{
    display_version, execute_convert, execute_simulate, validate_report_file, ConvertArgs,
    SimulateArgs,
};
use mpi_trace_studio::converter::ConverterConfig;
use mpi_trace_studio::model::Algorithm;
use mpi_trace_studio::timeline::{load_config, SimulationConfig};
use mpi_trace_studio::utils::config::{
    RAW_EVENT_PREFIX, RAW_EVENT_SUFFIX, TRACE_PREFIX, TRACE_SUFFIX,
};

/// MPI Trace Studio - timeline reconstruction for MPI traces
#[derive(Parser, Debug)]
#[command(name = "mpi-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert raw per-rank event logs into canonical traces
    Convert {
        /// Directory holding the raw event logs
        #[arg(short, long, default_value = ".")]
        input_dir: PathBuf,

        /// Directory receiving the canonical traces
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Gaps at or below this many milliseconds are treated as noise
        #[arg(long, default_value = "10")]
        noise_threshold_ms: f64,

        /// File name prefix of the raw event logs
        #[arg(long, default_value = RAW_EVENT_PREFIX)]
        input_prefix: String,

        /// File name suffix of the raw event logs
        #[arg(long, default_value = RAW_EVENT_SUFFIX)]
        input_suffix: String,

        /// File name prefix of the canonical traces
        #[arg(long, default_value = TRACE_PREFIX)]
        output_prefix: String,

        /// File name suffix of the canonical traces
        #[arg(long, default_value = TRACE_SUFFIX)]
        output_suffix: String,
    },

    /// Simulate the execution timeline of canonical traces
    Simulate {
        /// Directory holding the canonical traces
        #[arg(short, long, default_value = ".")]
        trace_dir: PathBuf,

        /// TOML file with simulation settings (flags override it)
        #[arg(short, long, env = "MPI_TRACE_CONFIG")]
        config: Option<PathBuf>,

        /// Reference link bandwidth in bytes/sec
        #[arg(short, long)]
        bandwidth: Option<f64>,

        /// Per-operation latency in microseconds
        #[arg(short, long)]
        latency: Option<f64>,

        /// Collective algorithm: flat, ring or tree
        #[arg(short, long)]
        algo: Option<Algorithm>,

        /// Bandwidth multiplier of the simulated network
        #[arg(short, long)]
        ratio: Option<f64>,

        /// Output path for the SVG timeline
        #[arg(long)]
        savefig: Option<PathBuf>,

        /// Timeline chart title
        #[arg(long)]
        title: Option<String>,

        /// Output path for the JSON report (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a simulation report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Convert {
            input_dir,
            output_dir,
            noise_threshold_ms,
            input_prefix,
            input_suffix,
            output_prefix,
            output_suffix,
        } => {
            let mut config = ConverterConfig::new()
                .with_noise_threshold_ms(noise_threshold_ms)?
                .with_input_naming(input_prefix, input_suffix);
            config.output_prefix = output_prefix;
            config.output_suffix = output_suffix;

            let args = ConvertArgs {
                input_dir,
                output_dir,
                config,
            };

            execute_convert(args)?;
        }

        Commands::Simulate {
            trace_dir,
            config,
            bandwidth,
            latency,
            algo,
            ratio,
            savefig,
            title,
            output,
            summary,
        } => {
            let mut sim_config = match config {
                Some(path) => load_config(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => SimulationConfig::default(),
            };

            if let Some(bandwidth) = bandwidth {
                sim_config.bandwidth = bandwidth;
            }
            if let Some(latency) = latency {
                sim_config.latency_us = latency;
            }
            if let Some(algo) = algo {
                sim_config.algorithm = algo;
            }
            if let Some(ratio) = ratio {
                sim_config.ratio = ratio;
            }
            if let Some(savefig) = savefig {
                sim_config.savefig = savefig;
            }
            if title.is_some() {
                sim_config.title = title;
            }

            let args = SimulateArgs {
                trace_dir,
                config: sim_config,
                output_json: output,
                print_summary: summary,
            };

            execute_simulate(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
