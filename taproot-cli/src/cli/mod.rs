//! Command-line interface for the taproot compression pipeline.
//!
//! The single `compress` command reads a text file of integer vectors, one
//! per line, compresses it and reports the storage figures.

mod commands;

pub use commands::{
    AlgorithmArg, Cli, CliError, Command, CompressCommand, EdgeSortArg, ExecutionSummary,
    TieBreakArg, render_summary, run_cli,
};

#[cfg(test)]
mod tests;
