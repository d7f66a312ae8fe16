//! Reconstruct a cumulative timeline from aggregated iterations.
//!
//! Compute and communication never overlap: each iteration's compute
//! starts where the previous communication ended, and its communication
//! starts where its compute ends.

use crate::aggregator::iterations::Iteration;
use crate::aggregator::metrics::{summarize, SimulationSummary};
use crate::model::cost::CostModelParameters;
use crate::timeline::config::SimulationConfig;
use crate::utils::error::ConfigError;
use log::debug;
use serde::{Deserialize, Serialize};

/// Placement of one iteration on the simulated timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub iteration_index: usize,
    pub compute_start: f64,
    pub compute_duration: f64,
    pub comm_start: f64,
    pub comm_duration: f64,
}

impl TimelineEntry {
    /// End of this iteration's communication
    pub fn end(&self) -> f64 {
        self.comm_start + self.comm_duration
    }
}

/// Result of replaying the iterations under both cost models
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    pub summary: SimulationSummary,

    /// Timeline under the configured (ratio-scaled) bandwidth
    pub timeline: Vec<TimelineEntry>,

    /// Timeline under the unscaled reference bandwidth
    pub baseline_timeline: Vec<TimelineEntry>,
}

/// Lay iterations end to end, costing communication with `params`
///
/// **Public** - timeline reconstruction for one cost model
pub fn build_timeline(iterations: &[Iteration], params: &CostModelParameters) -> Vec<TimelineEntry> {
    let mut cursor = 0.0;

    iterations
        .iter()
        .map(|iteration| {
            let entry = TimelineEntry {
                iteration_index: iteration.index,
                compute_start: cursor,
                compute_duration: iteration.compute_s,
                comm_start: cursor + iteration.compute_s,
                comm_duration: params.comm_time(iteration.bytes),
            };
            cursor = entry.end();
            entry
        })
        .collect()
}

/// Replay iterations under the configured and the baseline parameters
///
/// **Public** - main entry point for the simulation stage
///
/// # Arguments
/// * `iterations` - Output of the iteration aggregator
/// * `rank_count` - Number of ranks the traces came from (P)
/// * `config` - Validated simulation configuration
///
/// # Errors
/// * `ConfigError` - Invalid parameters or fewer than two ranks
pub fn simulate(
    iterations: &[Iteration],
    rank_count: usize,
    config: &SimulationConfig,
) -> Result<Simulation, ConfigError> {
    let (configured, baseline) = config.cost_parameters(rank_count)?;

    let timeline = build_timeline(iterations, &configured);
    let baseline_timeline = build_timeline(iterations, &baseline);

    debug!(
        "Simulated {} iterations at {:.3e} B/s (baseline {:.3e} B/s)",
        iterations.len(),
        configured.bandwidth(),
        baseline.bandwidth()
    );

    let summary = summarize(&timeline, &baseline_timeline, rank_count, config);

    Ok(Simulation {
        summary,
        timeline,
        baseline_timeline,
    })
}
