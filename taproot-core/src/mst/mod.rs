//! Minimum spanning tree (MST) construction.
//!
//! Three engines share one output type:
//!
//! - [`kruskal`]: sorts the edges ascending and accepts every edge joining
//!   two union-find components.
//! - [`prim`]: the naive `O(V·E)` scan over every crossing edge, kept for
//!   cross-checking on small graphs.
//! - [`prim_heap`]: a lazy-deletion heap fringe, `O(E log V)`.
//!
//! Both Prim variants accept a [`TieBreak`]. [`TieBreak::Shallow`] prefers,
//! among equally light candidates, the one whose new endpoint has the most
//! adjacency entries. It is a greedy proxy for a shallower tree and never
//! changes the total cost.
//!
//! Every engine checks connectivity before it starts and fails with
//! [`MstError::DisconnectedGraph`] rather than returning a forest. The Prim
//! engines read the adjacency list as given, so on a directed list they also
//! require every node to be reachable from the start node
//! ([`MstError::UnreachableNodes`]).

mod kruskal;
mod prim;

use thiserror::Error;
use tracing::instrument;

use crate::{
    AdjacencyList, DisjointSet, DisjointSetError, Edge, GraphError, HeapError, Orientation,
    SearchOrder, Weighting, count_components, edge::total_weight, error::define_error_codes,
    label_node_search,
};

pub use self::{
    kruskal::{EdgeSort, kruskal},
    prim::{TieBreak, prim, prim_heap},
};

/// Errors returned while computing a minimum spanning tree.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum MstError {
    /// The caller requested an MST for an empty graph.
    #[error("cannot compute an MST for an empty graph")]
    EmptyGraph,
    /// An edge or start node referenced a node id that is not present.
    #[error("node {node} is out of range for node_count {node_count}")]
    InvalidNodeId {
        /// The invalid node id.
        node: usize,
        /// The number of nodes in the graph.
        node_count: usize,
    },
    /// An edge contained a non-finite weight.
    #[error("edge ({left}, {right}) has non-finite weight")]
    NonFiniteWeight {
        /// The first endpoint id.
        left: usize,
        /// The second endpoint id.
        right: usize,
    },
    /// The graph has more than one connected component.
    #[error("graph is disconnected ({components} components); a spanning tree needs exactly one")]
    DisconnectedGraph {
        /// Number of connected components found.
        components: usize,
    },
    /// The adjacency list is weakly connected, but its edge directions leave
    /// some nodes unreachable from the start node.
    #[error("{unreached} nodes cannot be reached from start node {start}")]
    UnreachableNodes {
        /// The start node.
        start: usize,
        /// Number of nodes the start node cannot reach.
        unreached: usize,
    },
    /// Edges declared as presorted were not in ascending weight order.
    #[error("edges are not sorted by ascending weight at index {index}")]
    UnsortedEdges {
        /// Index of the first edge lighter than its predecessor.
        index: usize,
    },
    /// The heap fringe was used inconsistently.
    #[error(transparent)]
    Heap(#[from] HeapError),
    /// The union-find used for cycle detection rejected an operation.
    #[error(transparent)]
    DisjointSet(#[from] DisjointSetError),
}

impl From<GraphError> for MstError {
    fn from(error: GraphError) -> Self {
        match error {
            GraphError::EmptyEdgeList => Self::EmptyGraph,
            GraphError::InvalidNodeId { node, node_count } => {
                Self::InvalidNodeId { node, node_count }
            }
            GraphError::NonFiniteWeight {
                source_node,
                target,
            } => Self::NonFiniteWeight {
                left: source_node,
                right: target,
            },
        }
    }
}

define_error_codes! {
    /// Stable codes describing [`MstError`] variants.
    enum MstErrorCode for MstError {
        /// The caller requested an MST for an empty graph.
        EmptyGraph => EmptyGraph => "MST_EMPTY_GRAPH",
        /// An edge or start node referenced a node id that is not present.
        InvalidNodeId => InvalidNodeId { .. } => "MST_INVALID_NODE_ID",
        /// An edge contained a non-finite weight.
        NonFiniteWeight => NonFiniteWeight { .. } => "MST_NON_FINITE_WEIGHT",
        /// The graph has more than one connected component.
        DisconnectedGraph => DisconnectedGraph { .. } => "MST_DISCONNECTED_GRAPH",
        /// Edge directions leave nodes unreachable from the start node.
        UnreachableNodes => UnreachableNodes { .. } => "MST_UNREACHABLE_NODES",
        /// Edges declared as presorted were not in ascending weight order.
        UnsortedEdges => UnsortedEdges { .. } => "MST_UNSORTED_EDGES",
        /// The heap fringe was used inconsistently.
        HeapFailure => Heap(..) => "MST_HEAP_FAILURE",
        /// The union-find rejected an operation.
        DisjointSetFailure => DisjointSet(..) => "MST_DISJOINT_SET_FAILURE",
    }
}

/// MST engine selection.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MstAlgorithm {
    /// Sort plus union-find.
    Kruskal,
    /// Naive Prim scanning every crossing edge per step.
    Prim,
    /// Prim with a lazy-deletion heap fringe.
    #[default]
    PrimHeap,
}

/// Parameters for [`minimum_spanning_tree`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MstOptions {
    /// Engine to run.
    pub algorithm: MstAlgorithm,
    /// Tie-break used by the Prim engines.
    pub tie_break: TieBreak,
    /// Edge ordering strategy used by Kruskal.
    pub edge_sort: EdgeSort,
    /// Start node used by the Prim engines.
    pub start: usize,
}

/// The undirected output of an MST engine.
#[derive(Clone, Debug, PartialEq)]
pub struct SpanningTree {
    node_count: usize,
    edges: Vec<Edge>,
    cost: f64,
}

impl SpanningTree {
    fn new(node_count: usize, edges: Vec<Edge>) -> Self {
        let cost = total_weight(&edges);
        Self {
            node_count,
            edges,
            cost,
        }
    }

    /// Returns the number of spanned nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.node_count }

    /// Returns the accepted edges in acceptance order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Returns the sum of accepted weights.
    #[must_use]
    #[rustfmt::skip]
    pub fn cost(&self) -> f64 { self.cost }

    /// Builds the undirected adjacency list of the tree.
    #[must_use]
    pub fn adjacency_list(&self) -> AdjacencyList {
        AdjacencyList::assemble(
            self.node_count,
            &self.edges,
            Orientation::Undirected,
            Weighting::Weighted,
        )
    }

    /// Consumes the tree, returning its edges.
    #[must_use]
    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }
}

/// Computes a minimum spanning tree of the undirected graph
/// `(0..node_count, edges)` with the engine chosen in `options`.
///
/// # Errors
/// Returns [`MstError`] when the graph is empty or disconnected, when an edge
/// or the start node is out of range, or when a weight is non-finite.
///
/// # Examples
/// ```
/// use taproot_core::{Edge, MstAlgorithm, MstOptions, minimum_spanning_tree};
///
/// let edges = [
///     Edge::new(0, 1, 4.0),
///     Edge::new(1, 2, 1.0),
///     Edge::new(0, 2, 2.0),
/// ];
/// let options = MstOptions { algorithm: MstAlgorithm::Kruskal, ..MstOptions::default() };
/// let tree = minimum_spanning_tree(3, &edges, options)?;
/// assert_eq!(tree.cost(), 3.0);
/// assert_eq!(tree.edges().len(), 2);
/// # Ok::<(), taproot_core::MstError>(())
/// ```
#[instrument(
    name = "mst.dispatch",
    err,
    skip(edges),
    fields(edge_count = edges.len(), algorithm = ?options.algorithm),
)]
pub fn minimum_spanning_tree(
    node_count: usize,
    edges: &[Edge],
    options: MstOptions,
) -> Result<SpanningTree, MstError> {
    match options.algorithm {
        MstAlgorithm::Kruskal => kruskal(node_count, edges, options.edge_sort),
        MstAlgorithm::Prim | MstAlgorithm::PrimHeap => {
            validate_edges(node_count, edges)?;
            let adj = AdjacencyList::undirected(node_count, edges)?;
            if options.algorithm == MstAlgorithm::Prim {
                prim(&adj, options.start, options.tie_break)
            } else {
                prim_heap(&adj, options.start, options.tie_break)
            }
        }
    }
}

/// Rejects empty graphs, out-of-range endpoints and non-finite weights.
fn validate_edges(node_count: usize, edges: &[Edge]) -> Result<(), MstError> {
    if node_count == 0 {
        return Err(MstError::EmptyGraph);
    }
    for edge in edges {
        for node in [edge.source(), edge.target()] {
            if node >= node_count {
                return Err(MstError::InvalidNodeId { node, node_count });
            }
        }
        if !edge.weight().is_finite() {
            return Err(MstError::NonFiniteWeight {
                left: edge.source(),
                right: edge.target(),
            });
        }
    }
    Ok(())
}

fn ensure_connected(node_count: usize, edges: &[Edge]) -> Result<(), MstError> {
    match count_components(node_count, edges)? {
        1 => Ok(()),
        components => Err(MstError::DisconnectedGraph { components }),
    }
}

/// Validates an adjacency list for the Prim engines: non-empty, finite
/// weights, valid start node and every node reachable from `start`.
fn validate_adjacency(adj: &AdjacencyList, start: usize) -> Result<(), MstError> {
    let node_count = adj.node_count();
    if node_count == 0 {
        return Err(MstError::EmptyGraph);
    }
    if start >= node_count {
        return Err(MstError::InvalidNodeId {
            node: start,
            node_count,
        });
    }
    ensure_finite(adj)?;
    let labels = label_node_search(adj, start, None, SearchOrder::Breadth)?;
    let unreached = labels
        .iter()
        .enumerate()
        .filter(|&(node, label)| node != start && label.is_none())
        .count();
    if unreached == 0 {
        return Ok(());
    }
    Err(disconnection(adj, start, unreached)?)
}

fn ensure_finite(adj: &AdjacencyList) -> Result<(), MstError> {
    for node in 0..adj.node_count() {
        if let Some(entry) = adj
            .neighbours(node)
            .iter()
            .find(|entry| !entry.weight().is_finite())
        {
            return Err(MstError::NonFiniteWeight {
                left: node,
                right: entry.node(),
            });
        }
    }
    Ok(())
}

/// Classifies a failed reachability check: several weak components, or one
/// component whose edge directions strand `unreached` nodes.
fn disconnection(adj: &AdjacencyList, start: usize, unreached: usize) -> Result<MstError, MstError> {
    let node_count = adj.node_count();
    let mut set = DisjointSet::new(node_count);
    let mut components = node_count;
    for node in 0..node_count {
        for entry in adj.neighbours(node) {
            if set.union_nodes(node, entry.node())? {
                components -= 1;
            }
        }
    }
    Ok(if components > 1 {
        MstError::DisconnectedGraph { components }
    } else {
        MstError::UnreachableNodes { start, unreached }
    })
}

#[cfg(test)]
mod property;
