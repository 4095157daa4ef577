//! Centroid search and rooting of undirected trees.
//!
//! Both operations walk the tree iteratively, so deep trees (long MST
//! chains over near-identical vectors) cannot exhaust the call stack.
//! Inputs are checked up front: an adjacency list is accepted as a tree
//! only when it records exactly `n - 1` edges and a traversal from the start
//! node reaches all `n` nodes.

use std::collections::VecDeque;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::{AdjacencyList, Edge, Orientation, Weighting, error::define_error_codes};

/// Errors returned by centroid search and rooting.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum TreeError {
    /// The adjacency list covers no nodes.
    #[error("cannot root an empty tree")]
    EmptyTree,
    /// A start or root node is outside the tree.
    #[error("node {node} is out of range for node_count {node_count}")]
    InvalidNodeId {
        /// The invalid node id.
        node: usize,
        /// The number of nodes in the tree.
        node_count: usize,
    },
    /// The graph is not a tree: it has a cycle or more than one component.
    #[error(
        "graph is not a tree: {edge_count} edges over {node_count} nodes, {reached} reachable from the start"
    )]
    NotATree {
        /// Number of nodes.
        node_count: usize,
        /// Number of edges the adjacency list was built from.
        edge_count: usize,
        /// Nodes reached from the start node.
        reached: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`TreeError`] variants.
    enum TreeErrorCode for TreeError {
        /// The adjacency list covers no nodes.
        EmptyTree => EmptyTree => "TREE_EMPTY",
        /// A start or root node is outside the tree.
        InvalidNodeId => InvalidNodeId { .. } => "TREE_INVALID_NODE_ID",
        /// The graph is not a tree.
        NotATree => NotATree { .. } => "TREE_NOT_A_TREE",
    }
}

/// Breadth-first span of a validated tree.
struct Span {
    order: Vec<usize>,
    parents: Vec<Option<usize>>,
    weights: Vec<f32>,
}

fn span(adj: &AdjacencyList, start: usize) -> Result<Span, TreeError> {
    let node_count = adj.node_count();
    if node_count == 0 {
        return Err(TreeError::EmptyTree);
    }
    if start >= node_count {
        return Err(TreeError::InvalidNodeId {
            node: start,
            node_count,
        });
    }

    let mut seen = vec![false; node_count];
    let mut parents = vec![None; node_count];
    let mut weights = vec![0.0; node_count];
    let mut order = Vec::with_capacity(node_count);
    let mut queue = VecDeque::from([start]);
    seen[start] = true;
    while let Some(node) = queue.pop_front() {
        order.push(node);
        for entry in adj.neighbours(node) {
            let next = entry.node();
            if !seen[next] {
                seen[next] = true;
                parents[next] = Some(node);
                weights[next] = entry.weight();
                queue.push_back(next);
            }
        }
    }

    if adj.edge_count() + 1 != node_count || order.len() != node_count {
        return Err(TreeError::NotATree {
            node_count,
            edge_count: adj.edge_count(),
            reached: order.len(),
        });
    }
    Ok(Span {
        order,
        parents,
        weights,
    })
}

/// Finds a centroid of the tree: a node whose removal leaves no component
/// with more than half of the nodes.
///
/// Subtree sizes are accumulated children-first; the first node whose size
/// reaches half the tree is a centroid. A tree has at most two centroids,
/// and when it has two they are adjacent and split the nodes evenly. In that
/// case the smaller id is returned, so the answer never depends on `start`.
///
/// # Errors
/// Returns [`TreeError::EmptyTree`], [`TreeError::InvalidNodeId`] for an
/// out-of-range `start`, or [`TreeError::NotATree`].
///
/// # Examples
/// ```
/// use taproot_core::{AdjacencyList, Edge, find_centroid};
///
/// let path: Vec<Edge> = (0..4).map(|i| Edge::unweighted(i, i + 1)).collect();
/// let adj = AdjacencyList::undirected(5, &path)?;
/// assert_eq!(find_centroid(&adj, 0)?, 2);
/// assert_eq!(find_centroid(&adj, 4)?, 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "tree.centroid",
    err,
    skip(adj),
    fields(node_count = adj.node_count()),
)]
pub fn find_centroid(adj: &AdjacencyList, start: usize) -> Result<usize, TreeError> {
    let Span { order, parents, .. } = span(adj, start)?;
    let node_count = order.len();
    let mut size = vec![1_usize; node_count];
    let mut centroid = start;
    for &node in order.iter().rev() {
        if 2 * size[node] >= node_count {
            centroid = node;
            break;
        }
        if let Some(parent) = parents[node] {
            size[parent] += size[node];
        }
    }

    let twin = adj.neighbours(centroid).iter().map(|entry| entry.node()).find(|&next| {
        let component = if parents[centroid] == Some(next) {
            node_count - size[centroid]
        } else {
            size[next]
        };
        2 * component == node_count
    });
    let centroid = twin.map_or(centroid, |other| other.min(centroid));
    debug!(centroid, "centroid found");
    Ok(centroid)
}

/// A tree rooted at a chosen node, with every edge pointing away from it.
#[derive(Clone, Debug, PartialEq)]
pub struct RootedTree {
    root: usize,
    parents: Vec<Option<usize>>,
    edges: Vec<Edge>,
    order: Vec<usize>,
}

impl RootedTree {
    /// Returns the root node.
    #[must_use]
    #[rustfmt::skip]
    pub fn root(&self) -> usize { self.root }

    /// Returns the number of nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.parents.len() }

    /// Returns the parent of `node`; `None` for the root and for
    /// out-of-range ids.
    #[must_use]
    pub fn parent(&self, node: usize) -> Option<usize> {
        self.parents.get(node).copied().flatten()
    }

    /// Returns the parent array; the root's entry is `None`.
    #[must_use]
    #[rustfmt::skip]
    pub fn parents(&self) -> &[Option<usize>] { &self.parents }

    /// Returns the directed `parent -> child` edges in discovery order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Returns the nodes in breadth-first order; every parent precedes its
    /// children.
    #[must_use]
    #[rustfmt::skip]
    pub fn order(&self) -> &[usize] { &self.order }

    /// Returns the number of edges between `node` and the root, or `None`
    /// when `node` is out of range.
    #[must_use]
    pub fn depth(&self, node: usize) -> Option<usize> {
        if node >= self.parents.len() {
            return None;
        }
        let mut depth = 0;
        let mut current = node;
        while let Some(parent) = self.parents[current] {
            depth += 1;
            current = parent;
        }
        Some(depth)
    }

    /// Returns the length of the longest root-to-leaf path.
    #[must_use]
    pub fn height(&self) -> usize {
        let mut depth = vec![0_usize; self.parents.len()];
        let mut height = 0;
        for &node in &self.order {
            if let Some(parent) = self.parents[node] {
                depth[node] = depth[parent] + 1;
                height = height.max(depth[node]);
            }
        }
        height
    }

    /// Builds the directed adjacency list of the rooted tree.
    #[must_use]
    pub fn adjacency_list(&self) -> AdjacencyList {
        AdjacencyList::assemble(
            self.parents.len(),
            &self.edges,
            Orientation::Directed,
            Weighting::Weighted,
        )
    }
}

/// Roots an undirected tree at `root` with a breadth-first traversal.
///
/// Each newly discovered node records the node it was reached from as its
/// parent, and the traversal edge is kept as a directed `parent -> child`
/// edge carrying the original weight.
///
/// # Errors
/// Returns [`TreeError::EmptyTree`], [`TreeError::InvalidNodeId`] for an
/// out-of-range `root`, or [`TreeError::NotATree`].
///
/// # Examples
/// ```
/// use taproot_core::{AdjacencyList, Edge, direct_out_tree};
///
/// let adj = AdjacencyList::undirected(3, &[Edge::new(0, 1, 1.0), Edge::new(1, 2, 3.0)])?;
/// let tree = direct_out_tree(&adj, 1)?;
/// assert_eq!(tree.parents(), [Some(1), None, Some(1)]);
/// assert_eq!(tree.edges()[1], Edge::new(1, 2, 3.0));
/// assert_eq!(tree.height(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "tree.direct_out",
    err,
    skip(adj),
    fields(node_count = adj.node_count()),
)]
pub fn direct_out_tree(adj: &AdjacencyList, root: usize) -> Result<RootedTree, TreeError> {
    let Span {
        order,
        parents,
        weights,
    } = span(adj, root)?;
    let edges = order
        .iter()
        .filter_map(|&node| parents[node].map(|parent| Edge::new(parent, node, weights[node])))
        .collect();
    Ok(RootedTree {
        root,
        parents,
        edges,
        order,
    })
}
