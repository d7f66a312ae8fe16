//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading raw instrumentation events
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("{}:{line}: malformed event record: {source}", .path.display())]
    MalformedEvent {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },

    #[error("{}: {source}", .path.display())]
    Convert {
        path: PathBuf,
        source: ConvertError,
    },

    #[error("{}:{line}: event belongs to rank {found}, expected rank {expected}", .path.display())]
    RankMismatch {
        path: PathBuf,
        line: usize,
        expected: u32,
        found: u32,
    },

    #[error("Cannot derive a rank index from file name: {}", .0.display())]
    InvalidFileName(PathBuf),

    #[error("No raw event files matched {0}")]
    NoEventFiles(String),

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors raised while turning raw events into operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("line {line}: {func} event is missing a valid '{field}' field")]
    MissingPeer {
        line: usize,
        func: &'static str,
        field: &'static str,
    },
}

/// Errors that can occur while loading canonical operation traces
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("{}:{line}: bad line '{content}': {reason}", .path.display())]
    MalformedLine {
        path: PathBuf,
        line: usize,
        content: String,
        reason: String,
    },

    #[error("No trace files matched {0}")]
    NoTraceFiles(String),

    #[error("Invalid trace file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
}

/// Violations of the lock-step assumption across ranks
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConsistencyError {
    #[error("Rank traces have unequal length: rank 0 has {expected} operations, rank {rank} has {found}")]
    LengthMismatch {
        rank: usize,
        expected: usize,
        found: usize,
    },

    #[error("Rank traces hold an odd number of operations ({count}); expected compute/communication pairs")]
    OddOperationCount { count: usize },

    #[error("Rank {rank}, iteration {iteration}: expected one compute and one communication operation, found {first} and {second}")]
    InvalidPair {
        rank: usize,
        iteration: usize,
        first: &'static str,
        second: &'static str,
    },
}

/// Errors in the simulation configuration, raised before any file I/O
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown algorithm '{0}' (expected flat, ring or tree)")]
    UnknownAlgorithm(String),

    #[error("Bandwidth must be a positive finite number, got {0}")]
    InvalidBandwidth(f64),

    #[error("Latency must be a non-negative finite number, got {0}")]
    InvalidLatency(f64),

    #[error("Bandwidth ratio must be a positive finite number, got {0}")]
    InvalidRatio(f64),

    #[error("Cost model needs at least two ranks, got {0}")]
    InvalidRankCount(usize),

    #[error("Noise threshold must be a non-negative finite number of milliseconds, got {0}")]
    InvalidNoiseThreshold(f64),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Errors that can occur during timeline rendering
#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("Empty timeline")]
    EmptyTimeline,
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
