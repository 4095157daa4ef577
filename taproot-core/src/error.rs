//! Error types for the taproot core library.
//!
//! Each pipeline stage owns a narrow error enum; [`TaprootError`] aggregates
//! them for the orchestration surface and exposes stable machine-readable
//! codes for logging.

use std::fmt;

use thiserror::Error;

use crate::{
    codec::{CodecError, CodecErrorCode},
    mst::{MstError, MstErrorCode},
    similarity::{SimilarityError, SimilarityErrorCode},
    source::{SourceError, SourceErrorCode},
    tree::{TreeError, TreeErrorCode},
};

/// Generates a `Copy` code enum mirroring the variants of an error enum,
/// together with `as_str`, `Display` and a `code()` accessor on the error.
macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl ::std::fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

pub(crate) use define_error_codes;

/// Error type produced when configuring or running [`crate::Taproot`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TaprootError {
    /// The pipeline was asked to compress an empty vector collection.
    #[error("vector source `{source_name}` contains no vectors")]
    EmptySource {
        /// Name reported by the offending source.
        source_name: String,
    },
    /// The configured start node does not exist in the source.
    #[error("start node {start} is out of range for {node_count} vectors")]
    InvalidStartNode {
        /// The configured start node.
        start: usize,
        /// Number of vectors in the source.
        node_count: usize,
    },
    /// Kruskal was configured for presorted edges, which the similarity
    /// generator does not produce.
    #[error("presorted edge input is not available when edges come from the similarity generator")]
    PresortedEdgesUnsupported,
    /// Reading vectors from the source failed.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// Building the similarity edge list failed.
    #[error(transparent)]
    Similarity(#[from] SimilarityError),
    /// Minimum spanning tree construction failed.
    #[error(transparent)]
    Mst(#[from] MstError),
    /// Centroid search or tree rooting failed.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// Delta encoding or reconstruction failed.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

define_error_codes! {
    /// Stable codes describing [`TaprootError`] variants.
    enum TaprootErrorCode for TaprootError {
        /// The pipeline was asked to compress an empty vector collection.
        EmptySource => EmptySource { .. } => "TAPROOT_EMPTY_SOURCE",
        /// The configured start node does not exist in the source.
        InvalidStartNode => InvalidStartNode { .. } => "TAPROOT_INVALID_START_NODE",
        /// Kruskal was configured for presorted edges.
        PresortedEdgesUnsupported => PresortedEdgesUnsupported => "TAPROOT_PRESORTED_EDGES_UNSUPPORTED",
        /// Reading vectors from the source failed.
        SourceFailure => Source(..) => "TAPROOT_SOURCE_FAILURE",
        /// Building the similarity edge list failed.
        SimilarityFailure => Similarity(..) => "TAPROOT_SIMILARITY_FAILURE",
        /// Minimum spanning tree construction failed.
        MstFailure => Mst(..) => "TAPROOT_MST_FAILURE",
        /// Centroid search or tree rooting failed.
        TreeFailure => Tree(..) => "TAPROOT_TREE_FAILURE",
        /// Delta encoding or reconstruction failed.
        CodecFailure => Codec(..) => "TAPROOT_CODEC_FAILURE",
    }
}

/// Code of the stage-level error wrapped by a [`TaprootError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum StageErrorCode {
    /// See [`SourceErrorCode`].
    Source(SourceErrorCode),
    /// See [`SimilarityErrorCode`].
    Similarity(SimilarityErrorCode),
    /// See [`MstErrorCode`].
    Mst(MstErrorCode),
    /// See [`TreeErrorCode`].
    Tree(TreeErrorCode),
    /// See [`CodecErrorCode`].
    Codec(CodecErrorCode),
}

impl StageErrorCode {
    /// Return the stable machine-readable representation of the stage code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Source(code) => code.as_str(),
            Self::Similarity(code) => code.as_str(),
            Self::Mst(code) => code.as_str(),
            Self::Tree(code) => code.as_str(),
            Self::Codec(code) => code.as_str(),
        }
    }
}

impl fmt::Display for StageErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TaprootError {
    /// Retrieve the code of the wrapped stage error, when there is one.
    #[must_use]
    pub const fn stage_code(&self) -> Option<StageErrorCode> {
        match self {
            Self::Source(error) => Some(StageErrorCode::Source(error.code())),
            Self::Similarity(error) => Some(StageErrorCode::Similarity(error.code())),
            Self::Mst(error) => Some(StageErrorCode::Mst(error.code())),
            Self::Tree(error) => Some(StageErrorCode::Tree(error.code())),
            Self::Codec(error) => Some(StageErrorCode::Codec(error.code())),
            Self::EmptySource { .. }
            | Self::InvalidStartNode { .. }
            | Self::PresortedEdgesUnsupported => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, TaprootError>;
