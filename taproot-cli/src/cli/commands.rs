//! Command implementations and argument parsing for the taproot CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use taproot_core::{
    EdgeSort, MstAlgorithm, SourceError, TaprootBuilder, TaprootError, TieBreak, VectorSet,
    VectorSource,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "taproot",
    about = "Compress equal-length vectors as deltas along a minimum spanning tree."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Compress a file of vectors and report the storage figures.
    Compress(CompressCommand),
}

/// Options accepted by the `compress` command.
#[derive(Debug, Args, Clone)]
pub struct CompressCommand {
    /// Text file with one vector per line, as whitespace-separated integers.
    pub path: PathBuf,

    /// Minimum spanning tree engine.
    #[arg(long, value_enum, default_value_t = AlgorithmArg::PrimHeap)]
    pub algorithm: AlgorithmArg,

    /// Tie-break between equally light edges (Prim engines only).
    #[arg(long = "tie-break", value_enum, default_value_t = TieBreakArg::Shallow)]
    pub tie_break: TieBreakArg,

    /// Edge ordering used by Kruskal.
    #[arg(long = "edge-sort", value_enum, default_value_t = EdgeSortArg::Stable)]
    pub edge_sort: EdgeSortArg,

    /// Vector the Prim engines and the centroid search start from.
    #[arg(long, default_value_t = 0)]
    pub start: usize,

    /// Override name for the vector source (defaults to the file stem).
    #[arg(long)]
    pub name: Option<String>,

    /// Decode every vector after compressing and fail on any mismatch.
    #[arg(long)]
    pub verify: bool,
}

/// MST engines selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    /// Sort plus union-find.
    Kruskal,
    /// Naive Prim.
    Prim,
    /// Prim with a heap fringe.
    PrimHeap,
}

impl From<AlgorithmArg> for MstAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Kruskal => Self::Kruskal,
            AlgorithmArg::Prim => Self::Prim,
            AlgorithmArg::PrimHeap => Self::PrimHeap,
        }
    }
}

/// Tie-break policies selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TieBreakArg {
    /// First minimum-weight candidate.
    Minimum,
    /// Prefer the candidate with the busiest new endpoint.
    Shallow,
}

impl From<TieBreakArg> for TieBreak {
    fn from(value: TieBreakArg) -> Self {
        match value {
            TieBreakArg::Minimum => Self::Minimum,
            TieBreakArg::Shallow => Self::Shallow,
        }
    }
}

/// Kruskal edge orderings selectable on the command line. Presorted input is
/// not offered because generated edges are never sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EdgeSortArg {
    /// Stable comparison sort.
    Stable,
    /// In-place heapsort.
    Heapsort,
}

impl From<EdgeSortArg> for EdgeSort {
    fn from(value: EdgeSortArg) -> Self {
        match value {
            EdgeSortArg::Stable => Self::Stable,
            EdgeSortArg::Heapsort => Self::Heapsort,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while reading the input.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A token on an input line is not an integer.
    #[error("line {line}: `{token}` is not an integer")]
    InvalidToken {
        /// One-based line number.
        line: usize,
        /// Offending token.
        token: String,
    },
    /// The input lines have different lengths.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// The compression pipeline failed.
    #[error(transparent)]
    Core(#[from] TaprootError),
    /// `--verify` found vectors that did not decode to their input.
    #[error("{count} vectors failed to round-trip; first mismatch at vector {first}")]
    VerificationFailed {
        /// Number of mismatching vectors.
        count: usize,
        /// Lowest mismatching vector index.
        first: usize,
    },
}

/// Summarises the outcome of a `compress` run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSummary {
    /// Name of the vector source.
    pub source_name: String,
    /// Number of vectors.
    pub vectors: usize,
    /// Length of every vector.
    pub dimension: usize,
    /// Total Hamming distance along the spanning tree.
    pub mst_cost: f64,
    /// Index of the vector stored verbatim.
    pub centroid: usize,
    /// Longest reconstruction chain.
    pub tree_height: usize,
    /// Scalars in the uncompressed input.
    pub original_len: usize,
    /// Scalars in the storage matrix.
    pub stored_len: usize,
    /// `1 - stored/original`.
    pub reduction: f64,
    /// Whether `--verify` decoded every vector successfully.
    pub verified: bool,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when reading, compressing or verifying fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use taproot_cli::cli::{
/// #     AlgorithmArg, Cli, Command, CompressCommand, EdgeSortArg, TieBreakArg, run_cli,
/// # };
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0 0 0\n0 0 1\n1 0 1\n")?;
/// let cli = Cli {
///     command: Command::Compress(CompressCommand {
///         path: file.path().to_path_buf(),
///         algorithm: AlgorithmArg::PrimHeap,
///         tie_break: TieBreakArg::Shallow,
///         edge_sort: EdgeSortArg::Stable,
///         start: 0,
///         name: Some("chain".into()),
///         verify: true,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.centroid, 1);
/// assert!(summary.verified);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Compress(compress) => {
            Span::current().record("command", field::display("compress"));
            run_compress(compress)
        }
    }
}

#[instrument(
    name = "cli.compress",
    err,
    skip(command),
    fields(
        path = %command.path.display(),
        algorithm = ?command.algorithm,
        tie_break = ?command.tie_break,
        start = command.start,
        verify = command.verify,
    ),
)]
pub(super) fn run_compress(command: CompressCommand) -> Result<ExecutionSummary, CliError> {
    let taproot = TaprootBuilder::new()
        .with_algorithm(command.algorithm.into())
        .with_tie_break(command.tie_break.into())
        .with_edge_sort(command.edge_sort.into())
        .with_start(command.start)
        .build()?;

    let name = derive_source_name(&command.path, command.name.as_deref());
    let source = VectorSet::new(name, read_vectors(&command.path)?)?;
    let compression = taproot.compress(&source)?;

    let verified = if command.verify {
        let mismatches = compression.mismatches(source.as_slice())?;
        if let Some(&first) = mismatches.first() {
            return Err(CliError::VerificationFailed {
                count: mismatches.len(),
                first,
            });
        }
        true
    } else {
        false
    };

    let matrix = compression.matrix();
    let summary = ExecutionSummary {
        source_name: source.name().to_owned(),
        vectors: source.len(),
        dimension: source.dimension(),
        mst_cost: compression.spanning_tree().cost(),
        centroid: compression.centroid(),
        tree_height: compression.rooted_tree().height(),
        original_len: matrix.original_len(),
        stored_len: matrix.stored_len(),
        reduction: matrix.storage_reduction(),
        verified,
    };
    info!(
        source = summary.source_name.as_str(),
        stored = summary.stored_len,
        original = summary.original_len,
        "command completed"
    );
    Ok(summary)
}

/// Parses every non-blank line of `path` as a vector of integers.
#[instrument(name = "cli.read_vectors", err, fields(path = %path.display()))]
pub(super) fn read_vectors(path: &Path) -> Result<Vec<Vec<i64>>, CliError> {
    let io_error = |source: io::Error| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(path).map_err(io_error)?);
    let mut vectors = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(io_error)?;
        if line.trim().is_empty() {
            continue;
        }
        vectors.push(parse_line(index + 1, &line)?);
    }
    Ok(vectors)
}

pub(super) fn parse_line(line: usize, text: &str) -> Result<Vec<i64>, CliError> {
    text.split_whitespace()
        .map(|token| {
            token.parse().map_err(|_| CliError::InvalidToken {
                line,
                token: token.to_owned(),
            })
        })
        .collect()
}

pub(super) fn derive_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "vectors".to_owned(), ToOwned::to_owned)
}

/// Renders `summary` to `writer` as `key: value` lines.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use taproot_cli::cli::{ExecutionSummary, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     source_name: "demo".into(),
///     vectors: 3,
///     dimension: 3,
///     mst_cost: 2.0,
///     centroid: 1,
///     tree_height: 1,
///     original_len: 9,
///     stored_len: 9,
///     reduction: 0.0,
///     verified: false,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.starts_with("source: demo\n"));
/// assert!(text.contains("reduction: 0.00%\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "source: {}", summary.source_name)?;
    writeln!(writer, "vectors: {}", summary.vectors)?;
    writeln!(writer, "dimension: {}", summary.dimension)?;
    writeln!(writer, "mst cost: {}", summary.mst_cost)?;
    writeln!(writer, "centroid: {}", summary.centroid)?;
    writeln!(writer, "tree height: {}", summary.tree_height)?;
    writeln!(writer, "original scalars: {}", summary.original_len)?;
    writeln!(writer, "stored scalars: {}", summary.stored_len)?;
    writeln!(writer, "reduction: {:.2}%", summary.reduction * 100.0)?;
    if summary.verified {
        writeln!(writer, "verified: all vectors round-trip")?;
    }
    Ok(())
}
