use mpi_trace_studio::aggregator::{aggregate_ranks, comm_over_compute_pct, speedup, Iteration};
use mpi_trace_studio::parser::Operation;
use mpi_trace_studio::utils::error::ConsistencyError;

fn compute(duration_s: f64) -> Operation {
    Operation::Compute { duration_s }
}

fn allreduce(bytes: u64) -> Operation {
    Operation::Allreduce { bytes }
}

#[test]
fn test_iterations_average_across_ranks() {
    let ranks = vec![
        vec![compute(1.0), allreduce(100), compute(2.0), allreduce(300)],
        vec![compute(3.0), allreduce(200), compute(4.0), allreduce(500)],
    ];

    let iterations = aggregate_ranks(&ranks).unwrap();

    assert_eq!(
        iterations,
        vec![
            Iteration {
                index: 0,
                compute_s: 2.0,
                bytes: 150.0,
            },
            Iteration {
                index: 1,
                compute_s: 3.0,
                bytes: 400.0,
            },
        ]
    );
}

#[test]
fn test_iteration_count_is_half_the_operations() {
    let rank: Vec<Operation> = (0..6)
        .flat_map(|i| [compute(0.1), allreduce(i)])
        .collect();
    let iterations = aggregate_ranks(&[rank.clone(), rank.clone(), rank]).unwrap();
    assert_eq!(iterations.len(), 6);
}

#[test]
fn test_pair_order_does_not_matter() {
    let ranks = vec![
        vec![compute(1.0), allreduce(100)],
        vec![Operation::Send { bytes: 300, dest: 0 }, compute(3.0)],
    ];

    let iterations = aggregate_ranks(&ranks).unwrap();
    assert_eq!(iterations[0].compute_s, 2.0);
    assert_eq!(iterations[0].bytes, 200.0);
}

#[test]
fn test_two_communications_in_a_pair() {
    let ranks = vec![
        vec![allreduce(1), allreduce(2)],
        vec![compute(1.0), allreduce(2)],
    ];

    assert!(matches!(
        aggregate_ranks(&ranks),
        Err(ConsistencyError::InvalidPair {
            rank: 0,
            iteration: 0,
            ..
        })
    ));
}

#[test]
fn test_ranks_of_different_length() {
    let ranks = vec![vec![compute(1.0), allreduce(2)], vec![]];
    assert!(matches!(
        aggregate_ranks(&ranks),
        Err(ConsistencyError::LengthMismatch { rank: 1, .. })
    ));
}

#[test]
fn test_empty_traces_have_no_iterations() {
    assert!(aggregate_ranks(&[vec![], vec![]]).unwrap().is_empty());
}

#[test]
fn test_ratios_without_denominator() {
    assert_eq!(comm_over_compute_pct(0.0, 0.0), None);
    assert_eq!(speedup(0.0, 0.0, 0.0), None);
    assert_eq!(speedup(1.0, 1.0, 1.0), Some(1.0));
}
