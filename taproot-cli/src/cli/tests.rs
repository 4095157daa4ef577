//! Unit tests for the CLI command and input parsing.

use super::commands::{derive_source_name, parse_line, read_vectors, run_compress};
use super::{
    AlgorithmArg, Cli, CliError, Command, CompressCommand, EdgeSortArg, ExecutionSummary,
    TieBreakArg, render_summary, run_cli,
};

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use rstest::{fixture, rstest};
use taproot_core::{SourceError, TaprootErrorCode};
use taproot_test_support::fixtures::{FamilyShape, mutated_family, to_lines};
use taproot_test_support::tracing::RecordingLayer;
use tempfile::TempDir;
use tracing::Level;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[fixture]
fn dir() -> TempDir {
    TempDir::new().expect("temp dir")
}

fn write_input(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write input");
    path
}

fn command(path: PathBuf) -> CompressCommand {
    CompressCommand {
        path,
        algorithm: AlgorithmArg::PrimHeap,
        tie_break: TieBreakArg::Shallow,
        edge_sort: EdgeSortArg::Stable,
        start: 0,
        name: None,
        verify: true,
    }
}

#[rstest]
#[case::override_name("/tmp/bits.txt", Some("override"), "override")]
#[case::stem_with_extension("/tmp/bits.txt", None, "bits")]
#[case::stem_without_extension("/tmp/bits", None, "bits")]
#[case::missing_stem("", None, "vectors")]
fn derive_source_name_selects_expected_name(
    #[case] raw_path: &str,
    #[case] override_name: Option<&'static str>,
    #[case] expected: &str,
) {
    assert_eq!(derive_source_name(Path::new(raw_path), override_name), expected);
}

#[rstest]
#[case::spaces("0 1 1", vec![0, 1, 1])]
#[case::tabs_and_negatives("\t-3\t4  5 ", vec![-3, 4, 5])]
fn parse_line_reads_integers(#[case] text: &str, #[case] expected: Vec<i64>) {
    assert_eq!(parse_line(1, text).expect("integers"), expected);
}

#[rstest]
fn parse_line_reports_bad_token() {
    let err = parse_line(7, "1 x 2").expect_err("x is not an integer");
    assert!(matches!(
        err,
        CliError::InvalidToken { line: 7, ref token } if token == "x"
    ));
}

#[rstest]
fn read_vectors_skips_blank_lines(dir: TempDir) {
    let path = write_input(&dir, "gaps.txt", "1 2\n\n   \n3 4\n");
    assert_eq!(read_vectors(&path).expect("readable"), vec![vec![1, 2], vec![3, 4]]);
}

#[rstest]
#[case::kruskal(AlgorithmArg::Kruskal, EdgeSortArg::Heapsort, TieBreakArg::Shallow)]
#[case::prim(AlgorithmArg::Prim, EdgeSortArg::Stable, TieBreakArg::Minimum)]
#[case::prim_heap(AlgorithmArg::PrimHeap, EdgeSortArg::Stable, TieBreakArg::Shallow)]
fn compress_reports_summary(
    dir: TempDir,
    #[case] algorithm: AlgorithmArg,
    #[case] edge_sort: EdgeSortArg,
    #[case] tie_break: TieBreakArg,
) -> TestResult {
    let path = write_input(&dir, "chain.txt", "0 0 0\n0 0 1\n1 0 1\n");
    let summary = run_cli(Cli {
        command: Command::Compress(CompressCommand {
            algorithm,
            edge_sort,
            tie_break,
            ..command(path)
        }),
    })?;
    assert_eq!(
        summary,
        ExecutionSummary {
            source_name: "chain".to_owned(),
            vectors: 3,
            dimension: 3,
            mst_cost: 2.0,
            centroid: 1,
            tree_height: 1,
            original_len: 9,
            stored_len: 9,
            reduction: 0.0,
            verified: true,
        }
    );
    Ok(())
}

#[rstest]
fn compress_shrinks_a_related_family(dir: TempDir) -> TestResult {
    let family = mutated_family(
        5,
        FamilyShape {
            count: 50,
            dimension: 40,
            alphabet: 4,
            mutations: 2,
        },
    );
    let path = write_input(&dir, "family.txt", &to_lines(&family));
    let summary = run_compress(command(path))?;
    assert_eq!(summary.vectors, 50);
    assert!(summary.stored_len < summary.original_len);
    assert!(summary.reduction > 0.5);
    assert!(summary.verified);
    Ok(())
}

#[rstest]
fn compress_rejects_ragged_rows(dir: TempDir) {
    let path = write_input(&dir, "ragged.txt", "0 1\n1\n");
    let err = run_compress(command(path)).expect_err("ragged rows");
    assert!(matches!(
        err,
        CliError::Source(SourceError::DimensionMismatch { index: 1, .. })
    ));
}

#[rstest]
fn compress_rejects_empty_input(dir: TempDir) {
    let path = write_input(&dir, "empty.txt", "\n\n");
    let err = run_compress(command(path)).expect_err("no vectors");
    assert!(matches!(
        err,
        CliError::Core(ref core) if core.code() == TaprootErrorCode::EmptySource
    ));
}

#[rstest]
fn compress_rejects_out_of_range_start(dir: TempDir) {
    let path = write_input(&dir, "pair.txt", "0\n1\n");
    let err = run_compress(CompressCommand {
        start: 2,
        ..command(path)
    })
    .expect_err("start beyond input");
    assert!(matches!(
        err,
        CliError::Core(ref core) if core.code() == TaprootErrorCode::InvalidStartNode
    ));
}

#[rstest]
fn render_summary_lists_every_figure() -> TestResult {
    let summary = ExecutionSummary {
        source_name: "demo".into(),
        vectors: 4,
        dimension: 10,
        mst_cost: 3.0,
        centroid: 2,
        tree_height: 2,
        original_len: 40,
        stored_len: 19,
        reduction: 0.525,
        verified: true,
    };
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    assert_eq!(
        text,
        "source: demo\nvectors: 4\ndimension: 10\nmst cost: 3\ncentroid: 2\n\
         tree height: 2\noriginal scalars: 40\nstored scalars: 19\n\
         reduction: 52.50%\nverified: all vectors round-trip\n"
    );
    Ok(())
}

#[rstest]
#[case::defaults(&["taproot", "compress", "in.txt"], AlgorithmArg::PrimHeap, TieBreakArg::Shallow, false)]
#[case::flags(
    &["taproot", "compress", "in.txt", "--algorithm", "kruskal", "--tie-break", "minimum", "--verify"],
    AlgorithmArg::Kruskal,
    TieBreakArg::Minimum,
    true,
)]
fn clap_parses_compress_flags(
    #[case] args: &[&str],
    #[case] algorithm: AlgorithmArg,
    #[case] tie_break: TieBreakArg,
    #[case] verify: bool,
) {
    let cli = Cli::try_parse_from(args).expect("valid arguments");
    let Command::Compress(parsed) = cli.command;
    assert_eq!(parsed.path, PathBuf::from("in.txt"));
    assert_eq!(parsed.algorithm, algorithm);
    assert_eq!(parsed.tie_break, tie_break);
    assert_eq!(parsed.verify, verify);
}

#[rstest]
#[case::unknown_algorithm(&["taproot", "compress", "in.txt", "--algorithm", "boruvka"])]
#[case::presorted_not_offered(&["taproot", "compress", "in.txt", "--edge-sort", "presorted"])]
#[case::missing_path(&["taproot", "compress"])]
fn clap_rejects_invalid_arguments(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}

#[rstest]
fn compress_emits_tracing_fields(dir: TempDir) -> TestResult {
    let path = write_input(&dir, "bits.txt", "0 0 0\n0 0 1\n1 0 1\n");
    let (result, layer) = RecordingLayer::capture(|| {
        run_compress(CompressCommand {
            algorithm: AlgorithmArg::Kruskal,
            ..command(path)
        })
    });
    result?;

    assert!(
        layer
            .span_field("cli.compress", "path")
            .is_some_and(|value| value.ends_with("bits.txt"))
    );
    assert_eq!(
        layer.span_field("cli.compress", "algorithm").as_deref(),
        Some("Kruskal")
    );
    assert_eq!(
        layer.span_field("cli.compress", "verify").as_deref(),
        Some("true")
    );
    assert!(layer.span("mst.kruskal").is_some());
    assert!(layer.events().iter().any(|event| {
        event.level == Level::INFO
            && event.message() == Some("command completed")
            && event.fields.get("source").is_some_and(|value| value == "bits")
    }));
    Ok(())
}

#[rstest]
fn read_vectors_records_path_on_error(dir: TempDir) {
    let missing = dir.path().join("missing.txt");
    let (result, layer) = RecordingLayer::capture(|| read_vectors(&missing));
    assert!(matches!(result, Err(CliError::Io { .. })));
    assert!(
        layer
            .span_field("cli.read_vectors", "path")
            .is_some_and(|value| value.ends_with("missing.txt"))
    );
}
