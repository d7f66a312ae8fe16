//! Aggregation of per-rank traces into iterations and run metrics.
//!
//! This module transforms loaded operation traces into:
//! - Rank-averaged lock-step iterations
//! - Run totals, comm/compute percentage and speedup

pub mod iterations;
pub mod metrics;

// Re-export main types and functions
pub use iterations::{aggregate_ranks, build_iterations, Iteration};
pub use metrics::{comm_over_compute_pct, format_optional, speedup, summarize, SimulationSummary};
