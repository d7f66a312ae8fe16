//! Output writers for traces, reports and timelines.
//!
//! This module handles writing data to disk in various formats:
//! - Canonical per-rank operation traces
//! - JSON simulation reports
//! - SVG timelines

pub mod json;
pub mod trace;

// Re-export main functions
pub use json::{read_report, write_report};
pub use trace::{format_trace, write_trace, write_trace_set};

use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create parent directories of `path` if needed
pub fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

/// Write a rendered timeline chart
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty or a directory
/// * `OutputError::WriteFailed` - I/O error during write
pub fn write_svg(svg_content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    fs::write(output_path, svg_content)?;
    info!(
        "Timeline chart written ({:.2} KB)",
        svg_content.len() as f64 / 1024.0
    );
    Ok(())
}
