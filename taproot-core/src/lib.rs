//! Taproot core library.
//!
//! Compresses a collection of equal-length vectors by storing one reference
//! vector (the centroid of a minimum spanning tree over pairwise Hamming
//! distances) and, for every other vector, the positions where it differs
//! from its parent in that tree.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
pub mod codec;
mod disjoint_set;
mod edge;
mod error;
mod graph;
pub mod heap;
mod mst;
mod search;
mod similarity;
mod source;
mod taproot;
#[cfg(test)]
pub(crate) mod test_utils;
mod tree;

pub use crate::{
    builder::TaprootBuilder,
    codec::{
        CodecError, CodecErrorCode, StorageMatrix, StorageRecord, diff,
        estimated_reduction_percent,
    },
    disjoint_set::{DisjointSet, DisjointSetError, DisjointSetErrorCode, count_components},
    edge::Edge,
    error::{Result, StageErrorCode, TaprootError, TaprootErrorCode},
    graph::{
        AdjacencyList, Graph, GraphError, GraphErrorCode, IncidenceMatrix, Neighbour, Orientation,
        Weighting,
    },
    heap::{EdgeHeap, HeapError, HeapErrorCode},
    mst::{
        EdgeSort, MstAlgorithm, MstError, MstErrorCode, MstOptions, SpanningTree, TieBreak,
        kruskal, minimum_spanning_tree, prim, prim_heap,
    },
    search::{SearchOrder, label_node_search},
    similarity::{SimilarityError, SimilarityErrorCode, diff_mask, hamming_distance, hamming_edges},
    source::{SourceError, SourceErrorCode, VectorSet, VectorSource},
    taproot::{Compression, Taproot},
    tree::{RootedTree, TreeError, TreeErrorCode, direct_out_tree, find_centroid},
};
