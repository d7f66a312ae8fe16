use mpi_trace_studio::aggregator::aggregate_ranks;
use mpi_trace_studio::converter::{build_operations, convert_all, ConverterConfig};
use mpi_trace_studio::output::format_trace;
use mpi_trace_studio::parser::{
    discover_event_files, parse_raw_events, parse_trace, Operation, RawEvent,
};
use mpi_trace_studio::utils::error::{ConsistencyError, ParseError};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn allreduce(rank: u32, timestamp_ns: u64, bytes: u64) -> RawEvent {
    RawEvent {
        rank,
        timestamp_ns,
        func: "MPI_Allreduce".to_string(),
        bytes,
        dest: Some(-1),
        src: Some(-1),
        line: 0,
    }
}

#[test]
fn test_two_allreduces_yield_three_operations() {
    let events = vec![allreduce(0, 0, 1000), allreduce(0, 20_000_000, 2000)];
    let config = ConverterConfig::new().with_noise_threshold_ms(10.0).unwrap();

    let ops = build_operations(&events, &config).unwrap();

    assert_eq!(
        ops,
        vec![
            Operation::Allreduce { bytes: 1000 },
            Operation::Compute { duration_s: 0.02 },
            Operation::Allreduce { bytes: 2000 },
        ]
    );
    assert_eq!(ops[1].to_string(), "compute 0.020000");

    // Same shape on the second rank, and the pair grouping must refuse it
    let rank1 = build_operations(
        &[allreduce(1, 0, 1000), allreduce(1, 20_000_000, 2000)],
        &config,
    )
    .unwrap();
    let result = aggregate_ranks(&[ops, rank1]);
    assert_eq!(result, Err(ConsistencyError::OddOperationCount { count: 3 }));
}

#[test]
fn test_convert_all_keeps_rank_order() {
    let dir = tempdir().unwrap();
    for rank in [10u32, 2, 0] {
        let line = format!(
            "{{\"rank\":{},\"timestamp_ns\":0,\"func\":\"MPI_Allreduce\",\"bytes\":{},\"dest\":-1,\"src\":-1}}\n",
            rank,
            100 * (rank + 1)
        );
        fs::write(dir.path().join(format!("mpi_trace_rank_{}.txt", rank)), line).unwrap();
    }

    let config = ConverterConfig::default();
    let files = discover_event_files(dir.path(), &config.input_prefix, &config.input_suffix).unwrap();
    let converted = convert_all(&files, &config).unwrap();

    let ranks: Vec<u32> = converted.iter().map(|c| c.rank).collect();
    assert_eq!(ranks, vec![0, 2, 10]);
    assert_eq!(converted[2].operations, vec![Operation::Allreduce { bytes: 1100 }]);
}

#[test]
fn test_malformed_event_is_fatal() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("mpi_trace_rank_0.txt"),
        "{\"rank\":0,\"timestamp_ns\":0,\"func\":\"MPI_Allreduce\",\"bytes\":8}\nnot json\n",
    )
    .unwrap();

    let config = ConverterConfig::default();
    let files = discover_event_files(dir.path(), &config.input_prefix, &config.input_suffix).unwrap();
    let result = convert_all(&files, &config);

    assert!(matches!(
        result,
        Err(ParseError::MalformedEvent { line: 2, .. })
    ));
}

#[test]
fn test_rank_field_must_match_file_name() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("mpi_trace_rank_1.txt"),
        "{\"rank\":0,\"timestamp_ns\":0,\"func\":\"MPI_Allreduce\",\"bytes\":8}\n",
    )
    .unwrap();

    let config = ConverterConfig::default();
    let files = discover_event_files(dir.path(), &config.input_prefix, &config.input_suffix).unwrap();

    assert!(matches!(
        convert_all(&files, &config),
        Err(ParseError::RankMismatch {
            expected: 1,
            found: 0,
            ..
        })
    ));
}

#[test]
fn test_no_event_files() {
    let dir = tempdir().unwrap();
    let result = discover_event_files(dir.path(), "mpi_trace_rank_", ".txt");
    assert!(matches!(result, Err(ParseError::NoEventFiles(_))));
}

#[test]
fn test_converted_trace_survives_the_file_format() {
    // Wildcard receive as logged by the interposition library, then an
    // allreduce after a gap that is not a whole number of microseconds
    let contents = concat!(
        "{\"event_id\":0,\"func\":\"MPI_Recv\",\"timestamp_ns\":1000,\"count\":4,",
        "\"datatype\":\"MPI_INT\",\"bytes\":16,\"src\":-1,\"dest\":-1,",
        "\"direction\":\"recv\",\"tag\":0,\"comm_size\":2,\"rank\":1,\"data\":\"\"}\n",
        "{\"event_id\":1,\"func\":\"MPI_Allreduce\",\"timestamp_ns\":12346678,",
        "\"bytes\":8,\"src\":-1,\"dest\":-1,\"rank\":1}\n",
    );

    let events = parse_raw_events(contents, Path::new("mpi_trace_rank_1.txt"), 1).unwrap();
    let ops = build_operations(&events, &ConverterConfig::default()).unwrap();

    assert_eq!(
        ops,
        vec![
            Operation::Recv { bytes: 16, src: -1 },
            Operation::Compute {
                duration_s: 0.012346
            },
            Operation::Allreduce { bytes: 8 },
        ]
    );

    let text = format_trace(&ops);
    let reloaded = parse_trace(&text, Path::new("rank_1.trace")).unwrap();
    assert_eq!(reloaded, ops);
}
