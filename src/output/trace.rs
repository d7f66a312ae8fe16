//! Canonical trace writer.
//!
//! A trace is rendered to memory first and written in one call. A set of
//! traces is staged next to its targets and only renamed into place once
//! every rank has been staged.

use crate::parser::schema::Operation;
use crate::utils::error::OutputError;
use log::{debug, warn};
use std::fs;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

const STAGING_SUFFIX: &str = ".partial";

/// Render operations in the canonical line format
pub fn format_trace(ops: &[Operation]) -> String {
    let mut out = String::with_capacity(ops.len() * 16);
    for op in ops {
        out.push_str(&op.to_string());
        out.push('\n');
    }
    out
}

/// Write one rank's canonical trace
///
/// **Public** - used by the convert command
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty or a directory
/// * `OutputError::WriteFailed` - I/O error during write
pub fn write_trace(ops: &[Operation], output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    super::validate_path(output_path)?;
    super::ensure_parent_dir(output_path)?;

    fs::write(output_path, format_trace(ops))?;
    debug!(
        "Wrote {} operations to {}",
        ops.len(),
        output_path.display()
    );

    Ok(())
}

/// Write every rank's trace, or none of them
///
/// **Public** - used by the convert command
///
/// # Arguments
/// * `traces` - Target path and operations of each rank
///
/// # Errors
/// * `OutputError::InvalidPath` - A target is empty or a directory
/// * `OutputError::WriteFailed` - Staging or renaming failed; staged files are removed
pub fn write_trace_set(traces: &[(PathBuf, &[Operation])]) -> Result<(), OutputError> {
    for (path, _) in traces {
        super::validate_path(path)?;
        super::ensure_parent_dir(path)?;
    }

    let mut staged = Vec::with_capacity(traces.len());
    for (path, ops) in traces {
        let staging = staging_path(path);
        if let Err(e) = write_trace(ops, &staging) {
            remove_all(&staged);
            return Err(e);
        }
        staged.push(staging);
    }

    for (index, (path, _)) in traces.iter().enumerate() {
        if let Err(e) = fs::rename(&staged[index], path) {
            let placed: Vec<PathBuf> = traces[..index].iter().map(|(p, _)| p.clone()).collect();
            remove_all(&placed);
            remove_all(&staged[index..]);
            return Err(OutputError::WriteFailed(e));
        }
    }

    debug!("Wrote {} traces", traces.len());
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(STAGING_SUFFIX);
    path.with_file_name(name)
}

fn remove_all(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = fs::remove_file(path) {
            warn!("Could not remove {}: {}", path.display(), e);
        }
    }
}
