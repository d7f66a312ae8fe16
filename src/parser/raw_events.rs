//! Reader for raw per-rank instrumentation logs.
//!
//! Each log holds one JSON object per line for a single rank. Any record
//! that fails to deserialize aborts the whole file; the converter never
//! works from a partial event stream.

use super::schema::RawEvent;
use crate::utils::error::ParseError;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Raw event log discovered on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankEventFile {
    /// Rank index parsed from the file name
    pub rank: u32,
    pub path: PathBuf,
}

/// Find every `<prefix><rank><suffix>` file in `dir`
///
/// **Public** - used by the convert command
///
/// # Returns
/// Files ordered by rank index
///
/// # Errors
/// * `ParseError::NoEventFiles` - Nothing matched
/// * `ParseError::InvalidFileName` - Matched file has no integer rank
pub fn discover_event_files(
    dir: &Path,
    prefix: &str,
    suffix: &str,
) -> Result<Vec<RankEventFile>, ParseError> {
    let pattern = format!(
        "{}/{}*{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        glob::Pattern::escape(prefix),
        glob::Pattern::escape(suffix)
    );
    debug!("Discovering raw event files: {}", pattern);

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry.map_err(|e| ParseError::Io {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;
        let rank = rank_from_file_name(&path, prefix, suffix)
            .ok_or_else(|| ParseError::InvalidFileName(path.clone()))?;
        files.push(RankEventFile { rank, path });
    }

    if files.is_empty() {
        return Err(ParseError::NoEventFiles(pattern));
    }

    files.sort_by_key(|f| f.rank);
    Ok(files)
}

/// Extract the rank index from `<prefix><rank><suffix>`
fn rank_from_file_name(path: &Path, prefix: &str, suffix: &str) -> Option<u32> {
    path.file_name()?
        .to_str()?
        .strip_prefix(prefix)?
        .strip_suffix(suffix)?
        .parse()
        .ok()
}

/// Read all events of one rank from a JSON-lines log
///
/// **Public** - main entry point for raw event input
///
/// # Arguments
/// * `path` - Log file for a single rank
/// * `expected_rank` - Rank the file belongs to; every record must agree
///
/// # Returns
/// Events in file order (not yet sorted by timestamp)
///
/// # Errors
/// * `ParseError::Io` - File cannot be read
/// * `ParseError::MalformedEvent` - Record is not valid JSON or lacks a required field
/// * `ParseError::RankMismatch` - Record belongs to another rank
pub fn read_raw_events(path: &Path, expected_rank: u32) -> Result<Vec<RawEvent>, ParseError> {
    let contents = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let events = parse_raw_events(&contents, path, expected_rank)?;
    debug!(
        "Read {} raw events for rank {} from {}",
        events.len(),
        expected_rank,
        path.display()
    );
    Ok(events)
}

/// Parse JSON-lines content; `path` is only used for diagnostics
pub fn parse_raw_events(
    contents: &str,
    path: &Path,
    expected_rank: u32,
) -> Result<Vec<RawEvent>, ParseError> {
    let mut events = Vec::new();

    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut event: RawEvent =
            serde_json::from_str(line).map_err(|source| ParseError::MalformedEvent {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })?;

        if event.rank != expected_rank {
            return Err(ParseError::RankMismatch {
                path: path.to_path_buf(),
                line: index + 1,
                expected: expected_rank,
                found: event.rank,
            });
        }

        event.line = index + 1;
        events.push(event);
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_from_file_name() {
        let path = Path::new("/logs/mpi_trace_rank_12.txt");
        assert_eq!(rank_from_file_name(path, "mpi_trace_rank_", ".txt"), Some(12));
        assert_eq!(rank_from_file_name(path, "rank_", ".txt"), None);
        assert_eq!(
            rank_from_file_name(Path::new("mpi_trace_rank_x.txt"), "mpi_trace_rank_", ".txt"),
            None
        );
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let contents = "\n{\"rank\":1,\"timestamp_ns\":5,\"func\":\"MPI_Send\",\"bytes\":8,\"dest\":0}\n\n";
        let events = parse_raw_events(contents, Path::new("r1.txt"), 1).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].dest, Some(0));
        assert_eq!(events[0].line, 2);
    }

    #[test]
    fn test_parse_reports_line_number() {
        let contents = "{\"rank\":0,\"timestamp_ns\":1,\"func\":\"MPI_Allreduce\",\"bytes\":4}\n{\"rank\":0,\"func\":\"MPI_Allreduce\",\"bytes\":4}\n";
        let err = parse_raw_events(contents, Path::new("r0.txt"), 0).unwrap_err();
        match err {
            ParseError::MalformedEvent { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_rejects_foreign_rank() {
        let contents = "{\"rank\":3,\"timestamp_ns\":1,\"func\":\"MPI_Allreduce\",\"bytes\":4}";
        let err = parse_raw_events(contents, Path::new("r0.txt"), 0).unwrap_err();
        assert!(matches!(
            err,
            ParseError::RankMismatch { expected: 0, found: 3, line: 1, .. }
        ));
    }
}
