//! Simulate command implementation.
//!
//! The simulate command:
//! 1. Validates the network configuration
//! 2. Loads every rank's canonical trace
//! 3. Aggregates lock-step iterations
//! 4. Replays them under the configured and baseline cost models
//! 5. Writes the timeline SVG, the optional JSON report and the summary

use super::models::SimulateArgs;
use crate::aggregator::build_iterations;
use crate::output::{write_report, write_svg};
use crate::parser::load_traces;
use crate::timeline::{
    generate_text_summary, generate_timeline_svg, simulate, to_report, Simulation,
    TimelineChartConfig,
};
use anyhow::{Context, Result};
use colored::*;
use log::{debug, info, warn};
use std::time::Instant;

/// Execute the simulate command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Invalid configuration (before any file is read)
/// * Malformed or inconsistent traces
/// * File write errors
pub fn execute_simulate(args: SimulateArgs) -> Result<Simulation> {
    let start_time = Instant::now();
    let config = &args.config;

    info!("Step 1/5: Validating configuration...");
    validate_simulate_args(&args)?;

    info!("Step 2/5: Loading traces from {}...", args.trace_dir.display());
    let traces = load_traces(&args.trace_dir, &config.trace_prefix, &config.trace_suffix)
        .context("Failed to load rank traces")?;

    info!("Step 3/5: Aggregating iterations...");
    let iterations = build_iterations(&traces).context("Rank traces are inconsistent")?;
    debug!("{} iterations over {} ranks", iterations.len(), traces.rank_count());

    info!(
        "Step 4/5: Simulating ({} algorithm, ratio {}x)...",
        config.algorithm, config.ratio
    );
    let simulation = simulate(&iterations, traces.rank_count(), config)
        .context("Invalid simulation parameters")?;
    info!("Simulation: {}", simulation.summary.summary());

    info!("Step 5/5: Writing outputs...");
    if simulation.timeline.is_empty() {
        warn!("Traces hold no iterations; skipping timeline rendering");
    } else {
        let chart = match &config.title {
            Some(title) => TimelineChartConfig::new().with_title(title.as_str()),
            None => TimelineChartConfig::new(),
        };
        let svg = generate_timeline_svg(&simulation.timeline, Some(&chart))
            .context("Failed to render timeline")?;
        write_svg(&svg, &config.savefig).context("Failed to write timeline SVG")?;
        info!("✓ Timeline written to: {}", config.savefig.display());
    }

    if let Some(path) = &args.output_json {
        write_report(&to_report(&simulation), path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", path.display());
    }

    if args.print_summary {
        print_summary(&simulation);
    }

    info!(
        "Simulation completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(simulation)
}

fn print_summary(simulation: &Simulation) {
    println!();
    for line in generate_text_summary(&simulation.summary).lines() {
        if line.starts_with("===") {
            println!("{}", line.bold());
        } else if line.starts_with("speedup") {
            match simulation.summary.speedup {
                Some(s) if s > 1.0 => println!("{}", line.green()),
                Some(s) if s < 1.0 => println!("{}", line.red()),
                _ => println!("{}", line),
            }
        } else {
            println!("{}", line);
        }
    }
}

/// Validate simulate arguments
///
/// **Public** - configuration errors are fatal before any file I/O
pub fn validate_simulate_args(args: &SimulateArgs) -> Result<()> {
    args.config
        .validate()
        .context("Invalid simulation configuration")?;

    if args.config.trace_prefix.is_empty() && args.config.trace_suffix.is_empty() {
        anyhow::bail!("Trace prefix and suffix cannot both be empty");
    }

    if args.config.savefig.as_os_str().is_empty() {
        anyhow::bail!("Timeline output path cannot be empty");
    }

    Ok(())
}
