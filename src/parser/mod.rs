//! Trace parsing and schema definitions.
//!
//! This module handles:
//! - Reading raw JSON-lines instrumentation logs
//! - Loading canonical per-rank operation traces
//! - Defining the raw event and operation shapes

pub mod raw_events;
pub mod schema;
pub mod trace_file;

// Re-export main types
pub use raw_events::{discover_event_files, parse_raw_events, read_raw_events, RankEventFile};
pub use schema::{MpiCall, Operation, RawEvent};
pub use trace_file::{
    check_equal_lengths, load_traces, parse_operation_line, parse_trace, read_trace_file,
    RankTraces,
};
