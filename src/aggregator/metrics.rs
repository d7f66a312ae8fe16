//! Aggregate performance metrics of a simulated run.
//!
//! Totals come straight from the reconstructed timelines. Ratios whose
//! denominator is zero are reported as `None` instead of NaN/inf.

use crate::model::cost::Algorithm;
use crate::timeline::builder::TimelineEntry;
use crate::timeline::config::SimulationConfig;
use serde::{Deserialize, Serialize};

/// Headline numbers of one simulation
///
/// **Public** - rendered by the summary printer and stored in the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub rank_count: usize,
    pub iterations: usize,

    /// Reference bandwidth in bytes/sec (before `ratio`)
    pub bandwidth: f64,
    pub ratio: f64,
    pub latency_us: f64,
    pub algorithm: Algorithm,

    /// Sum of rank-averaged compute time (s)
    pub total_compute: f64,

    /// Sum of communication time under the configured bandwidth (s)
    pub total_comm: f64,

    /// Sum of communication time under the reference bandwidth (s)
    pub total_comm_baseline: f64,

    /// `100 * total_comm / total_compute`, absent when there is no compute
    pub comm_over_compute_pct: Option<f64>,

    /// Baseline run time over configured run time, absent for an empty run
    pub speedup: Option<f64>,
}

impl SimulationSummary {
    /// Total configured run time (s)
    pub fn total_time(&self) -> f64 {
        self.total_compute + self.total_comm
    }

    /// Get human-readable one-line summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Ranks: {} | Iterations: {} | Compute: {:.6} s | Comm: {:.6} s | Speedup: {}",
            self.rank_count,
            self.iterations,
            self.total_compute,
            self.total_comm,
            format_optional(self.speedup, "x")
        )
    }
}

/// Build the summary from the configured and baseline timelines
pub fn summarize(
    timeline: &[TimelineEntry],
    baseline: &[TimelineEntry],
    rank_count: usize,
    config: &SimulationConfig,
) -> SimulationSummary {
    let total_compute: f64 = timeline.iter().map(|e| e.compute_duration).sum();
    let total_comm: f64 = timeline.iter().map(|e| e.comm_duration).sum();
    let total_comm_baseline: f64 = baseline.iter().map(|e| e.comm_duration).sum();

    SimulationSummary {
        rank_count,
        iterations: timeline.len(),
        bandwidth: config.bandwidth,
        ratio: config.ratio,
        latency_us: config.latency_us,
        algorithm: config.algorithm,
        total_compute,
        total_comm,
        total_comm_baseline,
        comm_over_compute_pct: comm_over_compute_pct(total_comm, total_compute),
        speedup: speedup(total_compute, total_comm, total_comm_baseline),
    }
}

/// Communication time as a percentage of compute time
pub fn comm_over_compute_pct(total_comm: f64, total_compute: f64) -> Option<f64> {
    if total_compute > 0.0 {
        Some(100.0 * total_comm / total_compute)
    } else {
        None
    }
}

/// `(compute + baseline comm) / (compute + configured comm)`
pub fn speedup(total_compute: f64, total_comm: f64, total_comm_baseline: f64) -> Option<f64> {
    let configured = total_compute + total_comm;
    if configured > 0.0 {
        Some((total_compute + total_comm_baseline) / configured)
    } else {
        None
    }
}

/// Format an optional metric, "n/a" when undefined
pub fn format_optional(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.2}{}", v, unit),
        None => "n/a".to_string(),
    }
}
