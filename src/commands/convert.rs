//! Convert command implementation.
//!
//! The convert command:
//! 1. Discovers raw per-rank event logs
//! 2. Converts every rank in parallel
//! 3. Writes one canonical trace per rank, all of them or none

use super::models::ConvertArgs;
use crate::converter::convert_all;
use crate::output::write_trace_set;
use crate::parser::{discover_event_files, Operation};
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

/// Execute the convert command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// Paths of the written trace files, in rank order
///
/// # Errors
/// * No raw event files found
/// * Malformed event records (nothing is written in that case)
/// * File write errors (already staged traces are removed)
pub fn execute_convert(args: ConvertArgs) -> Result<Vec<PathBuf>> {
    let start_time = Instant::now();

    validate_convert_args(&args)?;

    info!("Step 1/3: Discovering raw event logs in {}...", args.input_dir.display());
    let files = discover_event_files(
        &args.input_dir,
        &args.config.input_prefix,
        &args.config.input_suffix,
    )
    .context("Failed to discover raw event logs")?;
    info!("Found {} rank logs", files.len());

    info!(
        "Step 2/3: Converting ranks (noise threshold {} ns)...",
        args.config.noise_threshold_ns
    );
    let converted = convert_all(&files, &args.config).context("Failed to convert raw events")?;

    info!("Step 3/3: Writing canonical traces...");
    let traces: Vec<(PathBuf, &[Operation])> = converted
        .iter()
        .map(|rank| {
            (
                args.output_dir.join(args.config.trace_file_name(rank.rank)),
                rank.operations.as_slice(),
            )
        })
        .collect();
    write_trace_set(&traces).context("Failed to write canonical traces")?;

    for (rank, (path, ops)) in converted.iter().zip(&traces) {
        info!("✓ Rank {}: {} operations -> {}", rank.rank, ops.len(), path.display());
    }
    let written = traces.into_iter().map(|(path, _)| path).collect();

    info!(
        "Conversion completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(written)
}

/// Validate convert arguments
///
/// **Public** - can be called before execute_convert for early validation
pub fn validate_convert_args(args: &ConvertArgs) -> Result<()> {
    if args.config.input_prefix.is_empty() && args.config.input_suffix.is_empty() {
        anyhow::bail!("Input prefix and suffix cannot both be empty");
    }

    if args.config.output_prefix.is_empty() && args.config.output_suffix.is_empty() {
        anyhow::bail!("Output prefix and suffix cannot both be empty");
    }

    if !args.input_dir.is_dir() {
        anyhow::bail!("Input directory does not exist: {}", args.input_dir.display());
    }

    Ok(())
}
