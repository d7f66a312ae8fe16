//! Timeline reconstruction, rendering and reporting.
//!
//! This module replays aggregated iterations through the cost model and
//! produces:
//! - Configured and baseline timelines
//! - An SVG timeline chart and a text summary
//! - A versioned JSON report

pub mod builder;
pub mod config;
pub mod generator;
pub mod report;

// Re-export main types
pub use builder::{build_timeline, simulate, Simulation, TimelineEntry};
pub use config::{load_config, SimulationConfig};
pub use generator::{generate_text_summary, generate_timeline_svg, TimelineChartConfig};
pub use report::{to_report, SimulationReport};
