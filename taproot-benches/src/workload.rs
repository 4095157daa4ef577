//! Seeded vector workloads shared by the benchmarks.

use taproot_core::{
    Edge, MstOptions, RootedTree, VectorSet, direct_out_tree, find_centroid, hamming_edges,
    minimum_spanning_tree,
};
use taproot_test_support::fixtures::{FamilyShape, mutated_family};

/// Alphabet size used by every workload; matches DNA-like data.
pub const ALPHABET: u8 = 4;

/// Positions rewritten per derived vector.
pub const MUTATIONS: usize = 2;

/// A family of related vectors with its similarity graph precomputed.
#[derive(Clone, Debug)]
pub struct Workload {
    vectors: VectorSet<u8>,
    edges: Vec<Edge>,
}

impl Workload {
    /// Generates `vector_count` related vectors of length `dimension`.
    ///
    /// # Errors
    /// Returns [`crate::error::BenchSetupError`] when the similarity graph
    /// cannot be built.
    pub fn generate(
        seed: u64,
        vector_count: usize,
        dimension: usize,
    ) -> Result<Self, crate::error::BenchSetupError> {
        let family = mutated_family(
            seed,
            FamilyShape {
                count: vector_count,
                dimension,
                alphabet: ALPHABET,
                mutations: MUTATIONS,
            },
        );
        let vectors = VectorSet::new(format!("family-{vector_count}x{dimension}"), family)?;
        let edges = hamming_edges(&vectors)?;
        Ok(Self { vectors, edges })
    }

    /// The generated vectors.
    #[must_use]
    pub const fn vectors(&self) -> &VectorSet<u8> {
        &self.vectors
    }

    /// The complete Hamming similarity graph.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Roots the default spanning tree at its centroid, ready for encoding.
    ///
    /// # Errors
    /// Returns [`crate::error::BenchSetupError`] when any stage fails.
    pub fn rooted_tree(&self) -> Result<RootedTree, crate::error::BenchSetupError> {
        let node_count = self.vectors.as_slice().len();
        let tree = minimum_spanning_tree(node_count, &self.edges, MstOptions::default())?;
        let adjacency = tree.adjacency_list();
        let centroid = find_centroid(&adjacency, 0)?;
        Ok(direct_out_tree(&adjacency, centroid)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn workload_graph_is_complete() -> Result<(), crate::error::BenchSetupError> {
        let workload = Workload::generate(1, 12, 20)?;
        assert_eq!(workload.edges().len(), 66);
        let tree = workload.rooted_tree()?;
        assert_eq!(tree.node_count(), 12);
        Ok(())
    }
}
