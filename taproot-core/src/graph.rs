//! Graph views over a node count and an edge list.
//!
//! [`Graph`] validates its inputs once at construction; the adjacency list
//! and incidence matrix are derived views rebuilt on every call, so a view
//! never goes stale relative to the edge list it came from.

use std::fmt;

use thiserror::Error;

use crate::{Edge, error::define_error_codes};

/// Errors returned while constructing a [`Graph`].
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum GraphError {
    /// The edge list was empty.
    #[error("cannot build a graph view from an empty edge list")]
    EmptyEdgeList,
    /// An edge referenced a node id that is not present in the graph.
    #[error("edge references node {node}, but node_count is {node_count}")]
    InvalidNodeId {
        /// The invalid node id referenced by an edge.
        node: usize,
        /// The number of nodes in the graph.
        node_count: usize,
    },
    /// A weighted edge carried a non-finite weight.
    #[error("edge ({source_node}, {target}) has non-finite weight")]
    NonFiniteWeight {
        /// The source endpoint.
        source_node: usize,
        /// The target endpoint.
        target: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// The edge list was empty.
        EmptyEdgeList => EmptyEdgeList => "GRAPH_EMPTY_EDGE_LIST",
        /// An edge referenced a node id that is not present in the graph.
        InvalidNodeId => InvalidNodeId { .. } => "GRAPH_INVALID_NODE_ID",
        /// A weighted edge carried a non-finite weight.
        NonFiniteWeight => NonFiniteWeight { .. } => "GRAPH_NON_FINITE_WEIGHT",
    }
}

/// Whether edges are read one-way or in both directions.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Orientation {
    /// Each edge points from its source to its target.
    Directed,
    /// Each edge connects its endpoints symmetrically.
    Undirected,
}

/// Whether edge weights are meaningful.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Weighting {
    /// Weights are read from the edges.
    Weighted,
    /// Every weight reads as zero.
    Unweighted,
}

/// A `(neighbour, weight)` entry of an adjacency list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbour {
    node: usize,
    weight: f32,
}

impl Neighbour {
    /// Returns the neighbouring node.
    #[must_use]
    #[rustfmt::skip]
    pub const fn node(&self) -> usize { self.node }

    /// Returns the weight of the connecting edge.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> f32 { self.weight }
}

/// Per-node ordered `(neighbour, weight)` sequences.
///
/// # Examples
/// ```
/// use taproot_core::{AdjacencyList, Edge};
///
/// let adj = AdjacencyList::undirected(3, &[Edge::new(0, 1, 2.0), Edge::new(1, 2, 1.0)])?;
/// assert_eq!(adj.degree(1), 2);
/// assert_eq!(adj.neighbours(0)[0].node(), 1);
/// assert_eq!(adj.edge_count(), 2);
/// # Ok::<(), taproot_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdjacencyList {
    neighbours: Vec<Vec<Neighbour>>,
    edge_count: usize,
}

impl AdjacencyList {
    /// Builds an adjacency list where every edge contributes an entry on both
    /// endpoints.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidNodeId`] when an edge references a node
    /// `>= node_count`.
    pub fn undirected(node_count: usize, edges: &[Edge]) -> Result<Self, GraphError> {
        check_node_ids(node_count, edges)?;
        Ok(Self::assemble(
            node_count,
            edges,
            Orientation::Undirected,
            Weighting::Weighted,
        ))
    }

    /// Builds an adjacency list where each edge contributes one entry on its
    /// source.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidNodeId`] when an edge references a node
    /// `>= node_count`.
    pub fn directed(node_count: usize, edges: &[Edge]) -> Result<Self, GraphError> {
        check_node_ids(node_count, edges)?;
        Ok(Self::assemble(
            node_count,
            edges,
            Orientation::Directed,
            Weighting::Weighted,
        ))
    }

    /// Builds the list from edges whose endpoints are already known to lie in
    /// `0..node_count`.
    pub(crate) fn assemble(
        node_count: usize,
        edges: &[Edge],
        orientation: Orientation,
        weighting: Weighting,
    ) -> Self {
        let mut neighbours = vec![Vec::new(); node_count];
        for edge in edges {
            let (source, target) = (edge.source(), edge.target());
            let weight = match weighting {
                Weighting::Weighted => edge.weight(),
                Weighting::Unweighted => 0.0,
            };
            neighbours[source].push(Neighbour {
                node: target,
                weight,
            });
            if orientation == Orientation::Undirected {
                neighbours[target].push(Neighbour {
                    node: source,
                    weight,
                });
            }
        }
        Self {
            neighbours,
            edge_count: edges.len(),
        }
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.neighbours.len()
    }

    /// Returns the number of edges the list was built from.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns `true` when the list covers no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neighbours.is_empty()
    }

    /// Returns `true` when `node` is a valid index.
    #[must_use]
    pub fn contains(&self, node: usize) -> bool {
        node < self.neighbours.len()
    }

    /// Returns the ordered neighbours of `node`, or an empty slice when the
    /// node is out of range.
    #[must_use]
    pub fn neighbours(&self, node: usize) -> &[Neighbour] {
        self.neighbours.get(node).map_or(&[], Vec::as_slice)
    }

    /// Returns the number of adjacency entries recorded for `node`.
    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.neighbours(node).len()
    }
}

fn check_node_ids(node_count: usize, edges: &[Edge]) -> Result<(), GraphError> {
    edges
        .iter()
        .flat_map(|edge| [edge.source(), edge.target()])
        .find(|&node| node >= node_count)
        .map_or(Ok(()), |node| {
            Err(GraphError::InvalidNodeId { node, node_count })
        })
}

impl fmt::Display for AdjacencyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (node, entries) in self.neighbours.iter().enumerate() {
            write!(f, "{node}:")?;
            for entry in entries {
                write!(f, " [{}, {}]", entry.node, entry.weight)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// An `N x E` matrix with `+1` at each edge's source row and `+1`
/// (undirected) or `-1` (directed) at its target row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncidenceMatrix {
    rows: Vec<Vec<i8>>,
}

impl IncidenceMatrix {
    /// Returns the matrix rows, one per node.
    #[must_use]
    pub fn rows(&self) -> &[Vec<i8>] {
        &self.rows
    }

    /// Returns the entry for `node` and edge column `edge`.
    #[must_use]
    pub fn get(&self, node: usize, edge: usize) -> Option<i8> {
        self.rows.get(node).and_then(|row| row.get(edge)).copied()
    }
}

impl fmt::Display for IncidenceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
            writeln!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}

/// A validated node set plus edge list, tagged with its orientation and
/// weighting.
///
/// # Examples
/// ```
/// use taproot_core::{Edge, Graph, Orientation, Weighting};
///
/// let edges = vec![Edge::new(0, 1, 3.0), Edge::new(1, 2, 4.0)];
/// let graph = Graph::new(3, edges, Orientation::Undirected, Weighting::Weighted)?;
/// let adj = graph.adjacency_list();
/// assert_eq!(adj.degree(1), 2);
/// assert_eq!(graph.incidence_matrix().get(2, 1), Some(1));
/// # Ok::<(), taproot_core::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Graph {
    node_count: usize,
    edges: Vec<Edge>,
    orientation: Orientation,
    weighting: Weighting,
}

impl Graph {
    /// Validates and wraps `edges` over the node set `0..node_count`.
    ///
    /// # Errors
    /// Returns [`GraphError::EmptyEdgeList`] when `edges` is empty,
    /// [`GraphError::InvalidNodeId`] when an endpoint is out of range and
    /// [`GraphError::NonFiniteWeight`] when a weighted edge is NaN or
    /// infinite.
    pub fn new(
        node_count: usize,
        edges: Vec<Edge>,
        orientation: Orientation,
        weighting: Weighting,
    ) -> Result<Self, GraphError> {
        if edges.is_empty() {
            return Err(GraphError::EmptyEdgeList);
        }
        check_node_ids(node_count, &edges)?;
        for edge in &edges {
            if weighting == Weighting::Weighted && !edge.weight().is_finite() {
                return Err(GraphError::NonFiniteWeight {
                    source_node: edge.source(),
                    target: edge.target(),
                });
            }
        }
        Ok(Self {
            node_count,
            edges,
            orientation,
            weighting,
        })
    }

    /// Returns the number of nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.node_count }

    /// Returns the edge list.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Returns the orientation tag.
    #[must_use]
    #[rustfmt::skip]
    pub fn orientation(&self) -> Orientation { self.orientation }

    /// Returns the weighting tag.
    #[must_use]
    #[rustfmt::skip]
    pub fn weighting(&self) -> Weighting { self.weighting }

    /// Builds a fresh adjacency list from the edge list.
    #[must_use]
    pub fn adjacency_list(&self) -> AdjacencyList {
        AdjacencyList::assemble(self.node_count, &self.edges, self.orientation, self.weighting)
    }

    /// Builds the incidence matrix of the graph.
    #[must_use]
    pub fn incidence_matrix(&self) -> IncidenceMatrix {
        let target_mark = match self.orientation {
            Orientation::Directed => -1,
            Orientation::Undirected => 1,
        };
        let mut rows = vec![vec![0_i8; self.edges.len()]; self.node_count];
        for (column, edge) in self.edges.iter().enumerate() {
            rows[edge.source()][column] = 1;
            rows[edge.target()][column] = target_mark;
        }
        IncidenceMatrix { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn sample_edges() -> Vec<Edge> {
        vec![
            Edge::new(0, 1, 0.0),
            Edge::new(0, 2, 1.0),
            Edge::new(0, 4, 2.0),
            Edge::new(1, 2, 3.0),
            Edge::new(1, 3, 4.0),
            Edge::new(2, 3, 5.0),
            Edge::new(2, 4, 6.0),
            Edge::new(3, 5, 7.0),
            Edge::new(4, 5, 8.0),
        ]
    }

    #[test]
    fn rejects_empty_edge_list() {
        let result = Graph::new(3, Vec::new(), Orientation::Undirected, Weighting::Weighted);
        assert_eq!(result, Err(GraphError::EmptyEdgeList));
    }

    #[rstest]
    #[case::source(Edge::new(4, 0, 1.0), 4)]
    #[case::target(Edge::new(0, 9, 1.0), 9)]
    fn rejects_out_of_range_endpoints(#[case] edge: Edge, #[case] node: usize) {
        let result = Graph::new(3, vec![edge], Orientation::Directed, Weighting::Weighted);
        assert_eq!(
            result,
            Err(GraphError::InvalidNodeId {
                node,
                node_count: 3
            })
        );
    }

    #[test]
    fn rejects_non_finite_weight_only_when_weighted() {
        let edges = vec![Edge::new(0, 1, f32::NAN)];
        let weighted = Graph::new(2, edges.clone(), Orientation::Undirected, Weighting::Weighted);
        assert!(matches!(
            weighted,
            Err(GraphError::NonFiniteWeight {
                source_node: 0,
                target: 1
            })
        ));
        let unweighted = Graph::new(2, edges, Orientation::Undirected, Weighting::Unweighted)
            .expect("unweighted graphs ignore weights");
        assert!(
            unweighted
                .adjacency_list()
                .neighbours(0)
                .iter()
                .all(|entry| entry.weight() == 0.0)
        );
    }

    #[test]
    fn undirected_adjacency_mirrors_every_edge() {
        let graph = Graph::new(6, sample_edges(), Orientation::Undirected, Weighting::Weighted)
            .expect("valid graph");
        let adj = graph.adjacency_list();
        assert_eq!(adj.node_count(), 6);
        let total: usize = (0..6).map(|node| adj.degree(node)).sum();
        assert_eq!(total, 2 * graph.edges().len());
        let first_of_five: Vec<(usize, f32)> = adj
            .neighbours(5)
            .iter()
            .map(|entry| (entry.node(), entry.weight()))
            .collect();
        assert_eq!(first_of_five, [(3, 7.0), (4, 8.0)]);
    }

    #[test]
    fn directed_adjacency_records_sources_only() {
        let graph = Graph::new(6, sample_edges(), Orientation::Directed, Weighting::Weighted)
            .expect("valid graph");
        let adj = graph.adjacency_list();
        assert_eq!(adj.degree(0), 3);
        assert_eq!(adj.degree(5), 0);
    }

    #[test]
    fn rebuilding_adjacency_does_not_duplicate_entries() {
        let graph = Graph::new(6, sample_edges(), Orientation::Undirected, Weighting::Weighted)
            .expect("valid graph");
        assert_eq!(graph.adjacency_list(), graph.adjacency_list());
    }

    #[rstest]
    #[case::directed(Orientation::Directed, -1)]
    #[case::undirected(Orientation::Undirected, 1)]
    fn incidence_matrix_marks_endpoints(#[case] orientation: Orientation, #[case] mark: i8) {
        let graph = Graph::new(6, sample_edges(), orientation, Weighting::Weighted)
            .expect("valid graph");
        let matrix = graph.incidence_matrix();
        assert_eq!(matrix.rows().len(), 6);
        assert_eq!(matrix.get(3, 7), Some(1));
        assert_eq!(matrix.get(5, 7), Some(mark));
        assert_eq!(matrix.get(0, 7), Some(0));
        for column in 0..graph.edges().len() {
            let nonzero = matrix
                .rows()
                .iter()
                .filter(|row| row[column] != 0)
                .count();
            assert_eq!(nonzero, 2);
        }
    }

    #[rstest]
    #[case::undirected(AdjacencyList::undirected)]
    #[case::directed(AdjacencyList::directed)]
    fn adjacency_builders_reject_out_of_range_edges(
        #[case] build: fn(usize, &[Edge]) -> Result<AdjacencyList, GraphError>,
    ) {
        let edges = [Edge::new(0, 1, 1.0), Edge::new(1, 9, 1.0), Edge::new(1, 2, 1.0)];
        assert_eq!(
            build(3, &edges),
            Err(GraphError::InvalidNodeId {
                node: 9,
                node_count: 3
            })
        );
    }

    #[test]
    fn adjacency_display_lists_each_node() -> Result<(), GraphError> {
        let adj = AdjacencyList::undirected(2, &[Edge::new(0, 1, 3.0)])?;
        assert_eq!(adj.to_string(), "0: [1, 3]\n1: [0, 3]\n");
        Ok(())
    }

    #[test]
    fn incidence_display_renders_rows() {
        let graph = Graph::new(2, vec![Edge::new(0, 1, 1.0)], Orientation::Directed, Weighting::Weighted)
            .expect("valid graph");
        assert_eq!(graph.incidence_matrix().to_string(), "[1]\n[-1]\n");
    }
}
