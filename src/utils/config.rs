//! Configuration and constants for the CLI.

/// Current simulation report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Gaps shorter than this between two instrumented calls are measurement
// jitter, not compute (10 ms)
pub const DEFAULT_NOISE_THRESHOLD_NS: u64 = 10_000_000;

// Raw per-rank event logs, as written by the MPI interposition library
pub const RAW_EVENT_PREFIX: &str = "mpi_trace_rank_";
pub const RAW_EVENT_SUFFIX: &str = ".txt";

// Canonical per-rank operation traces
pub const TRACE_PREFIX: &str = "rank_";
pub const TRACE_SUFFIX: &str = ".trace";

/// Default link bandwidth in bytes/sec (10 GB/s)
pub const DEFAULT_BANDWIDTH: f64 = 10e9;

/// Default per-message latency in microseconds
pub const DEFAULT_LATENCY_US: f64 = 0.0;

/// Default bandwidth scale ratio (no compression)
pub const DEFAULT_RATIO: f64 = 1.0;

/// Default path for the rendered timeline
pub const DEFAULT_TIMELINE_PATH: &str = "trace_timeline.svg";

/// Compute durations are stored at microsecond resolution
pub const NS_PER_US: f64 = 1e3;
pub const US_PER_SEC: f64 = 1e6;
pub const SECS_PER_US: f64 = 1e-6;
