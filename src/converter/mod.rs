//! Conversion of raw instrumentation events into canonical traces.
//!
//! This module turns per-rank event logs into:
//! - Ordered operation sequences (compute gaps + communication calls)
//! - One canonical trace per rank, converted in parallel

pub mod batch;
pub mod ops_builder;

// Re-export main types and functions
pub use batch::{convert_all, convert_rank_file, ConvertedRank};
pub use ops_builder::{build_operations, ConverterConfig};
