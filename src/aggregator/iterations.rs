//! Group per-rank operation pairs into lock-step iterations.
//!
//! Iteration `i` is made of operations `2i` and `2i+1` of every rank.
//! Exactly one of the two must be a communication operation; its position
//! inside the pair does not matter.

use crate::parser::schema::Operation;
use crate::parser::trace_file::{check_equal_lengths, RankTraces};
use crate::utils::error::ConsistencyError;
use log::debug;
use serde::{Deserialize, Serialize};

/// One logical loop step, averaged across ranks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Iteration {
    pub index: usize,

    /// Rank-averaged compute time in seconds
    pub compute_s: f64,

    /// Rank-averaged communication volume in bytes
    pub bytes: f64,
}

/// Build the iteration sequence from loaded traces
///
/// **Public** - main entry point for aggregation
///
/// # Arguments
/// * `traces` - Every rank's operations
///
/// # Returns
/// Iterations in index order; empty when the traces are empty
///
/// # Errors
/// * `ConsistencyError::LengthMismatch` - Ranks hold different operation counts
/// * `ConsistencyError::OddOperationCount` - Operations do not form pairs
/// * `ConsistencyError::InvalidPair` - A pair is not one compute + one communication
pub fn build_iterations(traces: &RankTraces) -> Result<Vec<Iteration>, ConsistencyError> {
    aggregate_ranks(&traces.ranks)
}

/// Same as [`build_iterations`], on bare per-rank sequences
pub fn aggregate_ranks(ranks: &[Vec<Operation>]) -> Result<Vec<Iteration>, ConsistencyError> {
    check_equal_lengths(ranks)?;

    let ops_per_rank = ranks.first().map_or(0, Vec::len);
    if ops_per_rank % 2 != 0 {
        return Err(ConsistencyError::OddOperationCount {
            count: ops_per_rank,
        });
    }

    let rank_count = ranks.len() as f64;
    let n_iter = ops_per_rank / 2;
    let mut iterations = Vec::with_capacity(n_iter);

    for index in 0..n_iter {
        let mut compute_sum = 0.0;
        let mut bytes_sum = 0.0;

        for (rank, ops) in ranks.iter().enumerate() {
            let (comm, compute) = split_pair(&ops[2 * index], &ops[2 * index + 1])
                .ok_or(ConsistencyError::InvalidPair {
                    rank,
                    iteration: index,
                    first: ops[2 * index].keyword(),
                    second: ops[2 * index + 1].keyword(),
                })?;

            bytes_sum += comm.bytes() as f64;
            compute_sum += compute.duration_s();
        }

        iterations.push(Iteration {
            index,
            compute_s: compute_sum / rank_count,
            bytes: bytes_sum / rank_count,
        });
    }

    debug!(
        "Aggregated {} iterations across {} ranks",
        iterations.len(),
        ranks.len()
    );

    Ok(iterations)
}

/// Return `(communication, compute)` if the pair holds exactly one of each
fn split_pair<'a>(a: &'a Operation, b: &'a Operation) -> Option<(&'a Operation, &'a Operation)> {
    match (a.is_communication(), b.is_communication()) {
        (true, false) => Some((a, b)),
        (false, true) => Some((b, a)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pair_either_order() {
        let comm = Operation::Allreduce { bytes: 10 };
        let compute = Operation::Compute { duration_s: 0.5 };

        let (c, p) = split_pair(&comm, &compute).unwrap();
        assert_eq!(c, &comm);
        assert_eq!(p, &compute);

        let (c, p) = split_pair(&compute, &comm).unwrap();
        assert_eq!(c, &comm);
        assert_eq!(p, &compute);
    }

    #[test]
    fn test_split_pair_rejects_same_kind() {
        let comm = Operation::Allreduce { bytes: 10 };
        let compute = Operation::Compute { duration_s: 0.5 };
        assert!(split_pair(&comm, &comm).is_none());
        assert!(split_pair(&compute, &compute).is_none());
    }

    #[test]
    fn test_averages_across_ranks() {
        let ranks = vec![
            vec![
                Operation::Compute { duration_s: 1.0 },
                Operation::Allreduce { bytes: 100 },
            ],
            vec![
                Operation::Allreduce { bytes: 300 },
                Operation::Compute { duration_s: 3.0 },
            ],
        ];

        let iterations = aggregate_ranks(&ranks).unwrap();
        assert_eq!(
            iterations,
            vec![Iteration {
                index: 0,
                compute_s: 2.0,
                bytes: 200.0
            }]
        );
    }

    #[test]
    fn test_empty_traces_give_no_iterations() {
        let ranks: Vec<Vec<Operation>> = vec![vec![], vec![]];
        assert!(aggregate_ranks(&ranks).unwrap().is_empty());
    }

    #[test]
    fn test_two_communications_in_a_pair() {
        let ranks = vec![vec![
            Operation::Compute { duration_s: 1.0 },
            Operation::Allreduce { bytes: 1 },
            Operation::Allreduce { bytes: 2 },
            Operation::Send { bytes: 3, dest: 1 },
        ]];

        assert_eq!(
            aggregate_ranks(&ranks).unwrap_err(),
            ConsistencyError::InvalidPair {
                rank: 0,
                iteration: 1,
                first: "allreduce",
                second: "send"
            }
        );
    }
}
