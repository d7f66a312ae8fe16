//! Convert every rank's raw log, one rank per worker.
//!
//! Ranks share no state, so conversion runs on the rayon pool. Results are
//! returned in rank order; nothing is written here.

use super::ops_builder::{build_operations, ConverterConfig};
use crate::parser::raw_events::{read_raw_events, RankEventFile};
use crate::parser::schema::Operation;
use crate::utils::error::ParseError;
use log::debug;
use rayon::prelude::*;

/// Canonical operations of one rank
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedRank {
    pub rank: u32,
    pub operations: Vec<Operation>,
}

/// Read and convert a single rank's raw event log
pub fn convert_rank_file(
    file: &RankEventFile,
    config: &ConverterConfig,
) -> Result<ConvertedRank, ParseError> {
    let events = read_raw_events(&file.path, file.rank)?;
    let operations = build_operations(&events, config).map_err(|source| ParseError::Convert {
        path: file.path.clone(),
        source,
    })?;

    debug!(
        "Rank {}: {} raw events -> {} operations",
        file.rank,
        events.len(),
        operations.len()
    );

    Ok(ConvertedRank {
        rank: file.rank,
        operations,
    })
}

/// Convert all ranks in parallel
///
/// **Public** - used by the convert command
///
/// # Returns
/// Converted ranks in the order of `files`
///
/// # Errors
/// The first failing rank's `ParseError`; no partial result is returned
pub fn convert_all(
    files: &[RankEventFile],
    config: &ConverterConfig,
) -> Result<Vec<ConvertedRank>, ParseError> {
    files
        .par_iter()
        .map(|file| convert_rank_file(file, config))
        .collect()
}
