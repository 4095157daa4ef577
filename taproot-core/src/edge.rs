//! Weighted edge triples shared by every graph algorithm in the crate.

use std::fmt;

/// A `(source, target, weight)` triple.
///
/// Undirected graphs store each edge once; the adjacency builder interprets
/// it symmetrically. Weights are Hamming distances in the compression
/// pipeline but the heap and MST engines accept any finite value.
///
/// # Examples
/// ```
/// use taproot_core::Edge;
///
/// let edge = Edge::new(0, 3, 2.0);
/// assert_eq!(edge.source(), 0);
/// assert_eq!(edge.target(), 3);
/// assert_eq!(edge.weight(), 2.0);
/// assert_eq!(edge.reversed(), Edge::new(3, 0, 2.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    source: usize,
    target: usize,
    weight: f32,
}

impl Edge {
    /// Creates an edge from `source` to `target` with the given `weight`.
    #[must_use]
    pub const fn new(source: usize, target: usize, weight: f32) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }

    /// Creates an edge for an unweighted graph; its weight reads as zero.
    #[must_use]
    pub const fn unweighted(source: usize, target: usize) -> Self {
        Self::new(source, target, 0.0)
    }

    /// Returns the source endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn source(&self) -> usize { self.source }

    /// Returns the target endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn target(&self) -> usize { self.target }

    /// Returns the edge weight.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> f32 { self.weight }

    /// Returns the same edge with its endpoints swapped.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self::new(self.target, self.source, self.weight)
    }

    pub(crate) fn set_weight(&mut self, weight: f32) {
        self.weight = weight;
    }
}

impl From<(usize, usize, f32)> for Edge {
    fn from((source, target, weight): (usize, usize, f32)) -> Self {
        Self::new(source, target, weight)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.source, self.target, self.weight)
    }
}

/// Sums edge weights as `f64` so that long trees do not lose precision.
pub(crate) fn total_weight(edges: &[Edge]) -> f64 {
    edges.iter().map(|edge| f64::from(edge.weight())).sum()
}
