//! MPI Trace Studio
//!
//! Timeline reconstruction and network what-if simulation for
//! MPI applications.
//!
//! This crate provides the core implementation for the
//! `mpi-trace` CLI tool:
//!
//! - `convert`: raw per-rank event logs into canonical operation traces
//! - `simulate`: canonical traces into a reconstructed timeline, a run
//!   summary and a speedup estimate under a faster network
//!
//! ```bash
//! mpi-trace convert --input-dir logs/ --output-dir traces/
//! mpi-trace simulate --trace-dir traces/ --algo ring --ratio 4 --summary
//! ```

pub mod aggregator;
pub mod commands;
pub mod converter;
pub mod model;
pub mod output;
pub mod parser;
pub mod timeline;
pub mod utils;
