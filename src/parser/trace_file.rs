//! Loader for canonical per-rank operation traces.
//!
//! Grammar, one operation per line:
//! ```text
//! compute <seconds>
//! allreduce <bytes>
//! send <bytes> <dest>
//! recv <bytes> <src>          (src < 0: any source)
//! ```
//! Rank indices are assigned by sorted file name, and every rank must hold
//! the same number of operations.

use super::schema::Operation;
use crate::utils::error::{ConsistencyError, TraceError};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Canonical traces of every rank, fully materialized
#[derive(Debug, Clone, PartialEq)]
pub struct RankTraces {
    /// Source file of each rank, indexed by rank
    pub files: Vec<PathBuf>,

    /// Operation sequence of each rank, indexed by rank
    pub ranks: Vec<Vec<Operation>>,
}

impl RankTraces {
    /// Number of ranks (P)
    pub fn rank_count(&self) -> usize {
        self.ranks.len()
    }

    /// Operations per rank (equal for every rank once loaded)
    pub fn ops_per_rank(&self) -> usize {
        self.ranks.first().map_or(0, Vec::len)
    }
}

/// Parse one trace line into an operation
///
/// **Public** - used by the loader and by tests
///
/// # Returns
/// The parsed operation, or a human-readable reason on failure
pub fn parse_operation_line(line: &str) -> Result<Operation, String> {
    let mut fields = line.split_whitespace();
    let keyword = fields.next().ok_or_else(|| "empty line".to_string())?;

    let op = match keyword {
        "compute" => {
            let duration_s: f64 = parse_field(fields.next(), "duration")?;
            if !duration_s.is_finite() || duration_s < 0.0 {
                return Err(format!("compute duration must be >= 0, got {}", duration_s));
            }
            Operation::Compute { duration_s }
        }
        "allreduce" => Operation::Allreduce {
            bytes: parse_field(fields.next(), "bytes")?,
        },
        "send" => Operation::Send {
            bytes: parse_field(fields.next(), "bytes")?,
            dest: parse_field(fields.next(), "dest")?,
        },
        "recv" => Operation::Recv {
            bytes: parse_field(fields.next(), "bytes")?,
            src: parse_field(fields.next(), "src")?,
        },
        other => return Err(format!("unknown operation '{}'", other)),
    };

    if let Some(extra) = fields.next() {
        return Err(format!("unexpected trailing field '{}'", extra));
    }

    Ok(op)
}

fn parse_field<T: std::str::FromStr>(field: Option<&str>, name: &str) -> Result<T, String> {
    let raw = field.ok_or_else(|| format!("missing {}", name))?;
    raw.parse()
        .map_err(|_| format!("invalid {} '{}'", name, raw))
}

/// Parse the content of one trace file; `path` is only used for diagnostics
pub fn parse_trace(contents: &str, path: &Path) -> Result<Vec<Operation>, TraceError> {
    let mut ops = Vec::new();

    for (index, raw_line) in contents.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let op = parse_operation_line(line).map_err(|reason| TraceError::MalformedLine {
            path: path.to_path_buf(),
            line: index + 1,
            content: line.to_string(),
            reason,
        })?;
        ops.push(op);
    }

    Ok(ops)
}

/// Read and parse a single trace file
pub fn read_trace_file(path: &Path) -> Result<Vec<Operation>, TraceError> {
    let contents = fs::read_to_string(path).map_err(|source| TraceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_trace(&contents, path)
}

/// Find all `<prefix>*<suffix>` trace files in `dir`, lexicographically sorted
pub fn discover_trace_files(
    dir: &Path,
    prefix: &str,
    suffix: &str,
) -> Result<Vec<PathBuf>, TraceError> {
    let pattern = format!(
        "{}/{}*{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        glob::Pattern::escape(prefix),
        glob::Pattern::escape(suffix)
    );

    let mut files = glob::glob(&pattern)?
        .map(|entry| {
            entry.map_err(|e| TraceError::Io {
                path: e.path().to_path_buf(),
                source: e.into_error(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if files.is_empty() {
        return Err(TraceError::NoTraceFiles(pattern));
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!("Discovered {} trace files", files.len());
    Ok(files)
}

/// Check that every rank holds the same number of operations
///
/// **Public** - shared by the loader and the iteration aggregator
pub fn check_equal_lengths(ranks: &[Vec<Operation>]) -> Result<(), ConsistencyError> {
    let Some(first) = ranks.first() else {
        return Ok(());
    };
    let expected = first.len();

    match ranks.iter().position(|ops| ops.len() != expected) {
        Some(rank) => Err(ConsistencyError::LengthMismatch {
            rank,
            expected,
            found: ranks[rank].len(),
        }),
        None => Ok(()),
    }
}

/// Load every rank's canonical trace from `dir`
///
/// **Public** - main entry point for the simulation stage
///
/// # Arguments
/// * `dir` - Directory holding the trace files
/// * `prefix` / `suffix` - File naming convention (e.g. `rank_` / `.trace`)
///
/// # Returns
/// All ranks' operations, rank `r` being the r-th file in name order
///
/// # Errors
/// * `TraceError::NoTraceFiles` - Nothing matched the naming convention
/// * `TraceError::MalformedLine` - A line does not match the grammar
/// * `TraceError::Consistency` - Ranks hold different operation counts
pub fn load_traces(dir: &Path, prefix: &str, suffix: &str) -> Result<RankTraces, TraceError> {
    let files = discover_trace_files(dir, prefix, suffix)?;

    let ranks = files
        .iter()
        .map(|path| read_trace_file(path))
        .collect::<Result<Vec<_>, _>>()?;

    check_equal_lengths(&ranks)?;

    let traces = RankTraces { files, ranks };
    info!(
        "Loaded {} rank traces ({} operations each)",
        traces.rank_count(),
        traces.ops_per_rank()
    );
    Ok(traces)
}
