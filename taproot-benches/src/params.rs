//! Benchmark parameter labels.

use std::fmt;

use taproot_core::{MstAlgorithm, TieBreak};

/// Parameters for an MST engine benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct MstBenchParams {
    /// Number of vectors, hence graph nodes.
    pub vector_count: usize,
    /// Engine under test.
    pub algorithm: MstAlgorithm,
    /// Tie-break policy for the Prim engines.
    pub tie_break: TieBreak,
}

impl fmt::Display for MstBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},{:?},{:?}",
            self.vector_count, self.algorithm, self.tie_break
        )
    }
}

/// Parameters for a codec or pipeline benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct CodecBenchParams {
    /// Number of vectors.
    pub vector_count: usize,
    /// Length of every vector.
    pub dimension: usize,
}

impl fmt::Display for CodecBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},m={}", self.vector_count, self.dimension)
    }
}
