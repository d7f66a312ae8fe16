//! Simulation report schema written to JSON.
//!
//! Schema is versioned to allow future evolution.

use super::builder::{Simulation, TimelineEntry};
use crate::aggregator::metrics::SimulationSummary;
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    pub summary: SimulationSummary,

    /// Timeline under the configured bandwidth
    pub timeline: Vec<TimelineEntry>,

    /// Timeline under the reference bandwidth
    pub baseline_timeline: Vec<TimelineEntry>,
}

/// Convert a simulation into its report form
pub fn to_report(simulation: &Simulation) -> SimulationReport {
    use chrono::Utc;

    SimulationReport {
        version: SCHEMA_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        summary: simulation.summary.clone(),
        timeline: simulation.timeline.clone(),
        baseline_timeline: simulation.baseline_timeline.clone(),
    }
}
