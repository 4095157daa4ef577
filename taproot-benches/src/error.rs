//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` and report them once
//! from the criterion entry point.

use taproot_core::{CodecError, MstError, SimilarityError, SourceError, TaprootError, TreeError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// The generated vectors were rejected.
    #[error("vector source rejected: {0}")]
    Source(#[from] SourceError),
    /// Building the similarity graph failed.
    #[error("similarity graph failed: {0}")]
    Similarity(#[from] SimilarityError),
    /// MST computation failed.
    #[error("MST computation failed: {0}")]
    Mst(#[from] MstError),
    /// Centroid search or rooting failed.
    #[error("tree rooting failed: {0}")]
    Tree(#[from] TreeError),
    /// Encoding the storage matrix failed.
    #[error("delta encoding failed: {0}")]
    Codec(#[from] CodecError),
    /// The compression pipeline failed.
    #[error("compression failed: {0}")]
    Taproot(#[from] TaprootError),
}
