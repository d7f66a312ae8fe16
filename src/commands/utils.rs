use crate::output::read_report;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::PathBuf;

/// Validate a simulation report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Generated: {}", report.generated_at);
    println!("  Ranks: {}", report.summary.rank_count);
    println!("  Iterations: {}", report.summary.iterations);
    println!("  Timeline entries: {}", report.timeline.len());

    if report.timeline.len() != report.summary.iterations
        || report.baseline_timeline.len() != report.summary.iterations
    {
        anyhow::bail!("Timeline length does not match the iteration count");
    }

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("MPI Trace Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Timeline reconstruction and network what-if simulation for MPI traces.");
}
