//! Build canonical operation sequences from raw events.
//!
//! Compute time is never observed directly: it is the gap between two
//! consecutive instrumented calls, kept only when it exceeds the noise
//! threshold.
//!
//! Example (threshold 10 ms):
//! ```text
//! t=0ms  MPI_Allreduce 1000   ->  allreduce 1000
//! t=20ms MPI_Allreduce 2000   ->  compute 0.020000
//!                                 allreduce 2000
//! ```

use crate::parser::schema::{MpiCall, Operation, RawEvent};
use crate::utils::config::{
    DEFAULT_NOISE_THRESHOLD_NS, NS_PER_US, RAW_EVENT_PREFIX, RAW_EVENT_SUFFIX, TRACE_PREFIX,
    TRACE_SUFFIX, US_PER_SEC,
};
use crate::utils::error::{ConfigError, ConvertError};
use log::{debug, warn};

/// Converter configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ConverterConfig {
    /// Minimum gap (exclusive) treated as compute rather than jitter
    pub noise_threshold_ns: u64,
    pub input_prefix: String,
    pub input_suffix: String,
    pub output_prefix: String,
    pub output_suffix: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            noise_threshold_ns: DEFAULT_NOISE_THRESHOLD_NS,
            input_prefix: RAW_EVENT_PREFIX.to_string(),
            input_suffix: RAW_EVENT_SUFFIX.to_string(),
            output_prefix: TRACE_PREFIX.to_string(),
            output_suffix: TRACE_SUFFIX.to_string(),
        }
    }
}

impl ConverterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_noise_threshold_ns(mut self, threshold_ns: u64) -> Self {
        self.noise_threshold_ns = threshold_ns;
        self
    }

    /// Set the threshold from milliseconds, as given on the command line
    pub fn with_noise_threshold_ms(self, threshold_ms: f64) -> Result<Self, ConfigError> {
        if !threshold_ms.is_finite() || threshold_ms < 0.0 {
            return Err(ConfigError::InvalidNoiseThreshold(threshold_ms));
        }
        Ok(self.with_noise_threshold_ns((threshold_ms * 1e6).round() as u64))
    }

    pub fn with_input_naming(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.input_prefix = prefix.into();
        self.input_suffix = suffix.into();
        self
    }

    /// File name of rank `rank`'s canonical trace
    pub fn trace_file_name(&self, rank: u32) -> String {
        format!("{}{}{}", self.output_prefix, rank, self.output_suffix)
    }
}

/// Convert one rank's raw events into its canonical operation sequence
///
/// **Public** - main entry point for trace conversion
///
/// # Arguments
/// * `events` - All events of a single rank, in any order
/// * `config` - Converter configuration (noise threshold)
///
/// # Returns
/// Operations in execution order
///
/// # Algorithm
/// 1. Stable-sort events by timestamp (ties keep encounter order)
/// 2. Emit `compute` for every gap above the noise threshold
/// 3. Emit the communication operation for recognized calls
/// 4. Unrecognized calls only advance the previous timestamp
///
/// # Errors
/// * `ConvertError::MissingPeer` - A point-to-point call lacks a valid peer rank
pub fn build_operations(
    events: &[RawEvent],
    config: &ConverterConfig,
) -> Result<Vec<Operation>, ConvertError> {
    let mut sorted: Vec<&RawEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.timestamp_ns);

    let mut ops = Vec::with_capacity(events.len() * 2);
    let mut prev_timestamp: Option<u64> = None;
    let mut ignored = 0usize;

    for event in sorted {
        if let Some(prev) = prev_timestamp {
            let delta = event.timestamp_ns - prev;
            if delta > config.noise_threshold_ns {
                ops.push(Operation::Compute {
                    duration_s: gap_seconds(delta),
                });
            }
        }
        prev_timestamp = Some(event.timestamp_ns);

        match event.call() {
            MpiCall::Allreduce => ops.push(Operation::Allreduce { bytes: event.bytes }),
            MpiCall::Send => ops.push(Operation::Send {
                bytes: event.bytes,
                dest: peer_rank(event.dest, event.line, MpiCall::Send, "dest")?,
            }),
            MpiCall::Recv => ops.push(Operation::Recv {
                bytes: event.bytes,
                src: source_rank(event.src, event.line)?,
            }),
            MpiCall::Unrecognized => ignored += 1,
        }
    }

    if ignored > 0 {
        debug!("Ignored {} events with unrecognized call names", ignored);
    }
    if ops.len() % 2 != 0 {
        warn!(
            "Converted trace has an odd number of operations ({}); it will not pair into iterations",
            ops.len()
        );
    }

    Ok(ops)
}

/// Gap in seconds, rounded to the microsecond resolution of the trace format
fn gap_seconds(delta_ns: u64) -> f64 {
    (delta_ns as f64 / NS_PER_US).round() / US_PER_SEC
}

/// Destination of a send: must be a real rank
fn peer_rank(
    peer: Option<i64>,
    line: usize,
    call: MpiCall,
    field: &'static str,
) -> Result<u32, ConvertError> {
    peer.and_then(|p| u32::try_from(p).ok())
        .ok_or(ConvertError::MissingPeer {
            line,
            func: call.name(),
            field,
        })
}

/// Source of a receive: wildcards such as `MPI_ANY_SOURCE` stay negative
fn source_rank(src: Option<i64>, line: usize) -> Result<i32, ConvertError> {
    src.and_then(|s| i32::try_from(s).ok())
        .ok_or(ConvertError::MissingPeer {
            line,
            func: MpiCall::Recv.name(),
            field: "src",
        })
}
