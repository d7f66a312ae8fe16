//! Raw instrumentation records and canonical operation definitions.
//!
//! `RawEvent` mirrors one JSON line written by the MPI interposition
//! library. `Operation` is one line of a canonical per-rank trace.

use serde::Deserialize;
use std::fmt;

/// One instrumentation record as written by the interposition library
///
/// Only the fields the converter needs are declared; everything else the
/// logger writes (event_id, datatype, direction, payload hex, ...) is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawEvent {
    /// Process identifier
    pub rank: u32,

    /// Monotonic timestamp in nanoseconds since an arbitrary epoch
    pub timestamp_ns: u64,

    /// Instrumented call name (e.g. "MPI_Allreduce")
    pub func: String,

    /// Payload size in bytes
    pub bytes: u64,

    /// Destination rank (point-to-point send), -1 when not applicable
    #[serde(default)]
    pub dest: Option<i64>,

    /// Source rank (point-to-point receive), -1 when not applicable
    #[serde(default)]
    pub src: Option<i64>,

    /// 1-based line in the source log (0 when not read from a file)
    #[serde(skip)]
    pub line: usize,
}

impl RawEvent {
    /// Classify the call name into the closed set of recognized calls
    pub fn call(&self) -> MpiCall {
        MpiCall::from_name(&self.func)
    }
}

/// Instrumented MPI calls the converter understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MpiCall {
    Allreduce,
    Send,
    Recv,
    /// Any other instrumented call; contributes a timestamp but no operation
    Unrecognized,
}

impl MpiCall {
    pub fn from_name(name: &str) -> Self {
        match name {
            "MPI_Allreduce" => Self::Allreduce,
            "MPI_Send" => Self::Send,
            "MPI_Recv" => Self::Recv,
            _ => Self::Unrecognized,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Allreduce => "MPI_Allreduce",
            Self::Send => "MPI_Send",
            Self::Recv => "MPI_Recv",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// One logical action in a rank's canonical trace
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Time between two communication calls that exceeded the noise threshold
    Compute { duration_s: f64 },
    Allreduce { bytes: u64 },
    Send { bytes: u64, dest: u32 },
    /// `src` is negative for a wildcard receive (`MPI_ANY_SOURCE`)
    Recv { bytes: u64, src: i32 },
}

impl Operation {
    /// Keyword used for this operation in the trace file format
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Compute { .. } => "compute",
            Self::Allreduce { .. } => "allreduce",
            Self::Send { .. } => "send",
            Self::Recv { .. } => "recv",
        }
    }

    pub fn is_communication(&self) -> bool {
        !matches!(self, Self::Compute { .. })
    }

    /// Bytes moved by a communication operation (zero for compute)
    pub fn bytes(&self) -> u64 {
        match self {
            Self::Compute { .. } => 0,
            Self::Allreduce { bytes } | Self::Send { bytes, .. } | Self::Recv { bytes, .. } => {
                *bytes
            }
        }
    }

    /// Compute duration in seconds (zero for communication)
    pub fn duration_s(&self) -> f64 {
        match self {
            Self::Compute { duration_s } => *duration_s,
            _ => 0.0,
        }
    }
}

/// Renders the canonical trace line, e.g. `send 4096 3`
impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compute { duration_s } => write!(f, "compute {:.6}", duration_s),
            Self::Allreduce { bytes } => write!(f, "allreduce {}", bytes),
            Self::Send { bytes, dest } => write!(f, "send {} {}", bytes, dest),
            Self::Recv { bytes, src } => write!(f, "recv {} {}", bytes, src),
        }
    }
}
