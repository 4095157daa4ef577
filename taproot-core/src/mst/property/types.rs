//! Type definitions for MST property-based tests.

use test_strategy::Arbitrary;

use crate::{Edge, EdgeSort, MstAlgorithm, MstOptions, TieBreak};

/// Weight distribution strategy for generated graphs.
///
/// Every distribution produces a connected graph; disconnected inputs are
/// covered by unit tests.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum WeightDistribution {
    /// Continuous weights; the MST is unique up to float coincidence.
    #[weight(2)]
    Unique,
    /// Weights drawn from a pool of one to three integers, stressing ties.
    #[weight(3)]
    ManyIdentical,
    /// A random spanning path plus roughly `0.5n` to `n` extra edges.
    #[weight(2)]
    Sparse,
    /// Edge probability between 0.7 and 0.95.
    #[weight(2)]
    Dense,
    /// Complete graph over random bit vectors weighted by Hamming distance.
    #[weight(3)]
    Hamming,
}

/// Fixture for MST property tests.
#[derive(Clone, Debug)]
pub(super) struct MstFixture {
    /// Number of nodes in the graph.
    pub node_count: usize,
    /// Generated undirected edges.
    pub edges: Vec<Edge>,
    /// Weight distribution used during generation.
    pub distribution: WeightDistribution,
    /// Start node handed to the Prim engines.
    pub start: usize,
}

impl MstFixture {
    /// Returns a short description used in failure messages.
    pub(super) fn describe(&self) -> String {
        format!(
            "distribution={:?}, nodes={}, edges={}, start={}",
            self.distribution,
            self.node_count,
            self.edges.len(),
            self.start,
        )
    }

    /// Returns engine options for every engine and tie-break combination.
    pub(super) fn engine_matrix(&self) -> Vec<MstOptions> {
        let kruskal = [EdgeSort::Stable, EdgeSort::Heapsort].map(|edge_sort| MstOptions {
            algorithm: MstAlgorithm::Kruskal,
            edge_sort,
            start: self.start,
            ..MstOptions::default()
        });
        let prim = [MstAlgorithm::Prim, MstAlgorithm::PrimHeap]
            .into_iter()
            .flat_map(|algorithm| {
                [TieBreak::Minimum, TieBreak::Shallow].map(|tie_break| MstOptions {
                    algorithm,
                    tie_break,
                    start: self.start,
                    ..MstOptions::default()
                })
            });
        kruskal.into_iter().chain(prim).collect()
    }
}
