//! Kruskal's algorithm over a union-find.

use tracing::{debug, instrument};

use crate::{DisjointSet, Edge, heap::heapsort};

use super::{MstError, SpanningTree, ensure_connected, validate_edges};

/// How Kruskal orders the edge list before scanning it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum EdgeSort {
    /// Stable ascending sort; equal weights keep their input order.
    #[default]
    Stable,
    /// Heapsort (non-increasing) followed by a reversal. Not stable.
    Heapsort,
    /// The caller guarantees ascending order; it is verified, not re-sorted.
    Presorted,
}

/// Computes a minimum spanning tree with Kruskal's algorithm.
///
/// Edges are interpreted as undirected. With [`EdgeSort::Stable`] the
/// accepted edge set is deterministic: ties are broken by input order.
///
/// # Errors
/// Returns [`MstError::EmptyGraph`] when `node_count == 0`,
/// [`MstError::InvalidNodeId`] or [`MstError::NonFiniteWeight`] for invalid
/// edges, [`MstError::DisconnectedGraph`] when the edges do not connect every
/// node, and [`MstError::UnsortedEdges`] when presorted input is out of
/// order.
///
/// # Examples
/// ```
/// use taproot_core::{Edge, EdgeSort, kruskal};
///
/// let edges = [
///     Edge::new(0, 1, 5.0),
///     Edge::new(0, 2, 6.0),
///     Edge::new(1, 2, 2.0),
///     Edge::new(1, 4, 3.0),
///     Edge::new(1, 3, 4.0),
///     Edge::new(2, 4, 4.0),
///     Edge::new(3, 4, 2.0),
///     Edge::new(3, 5, 6.0),
///     Edge::new(4, 5, 5.0),
/// ];
/// let tree = kruskal(6, &edges, EdgeSort::Stable)?;
/// assert_eq!(tree.cost(), 17.0);
/// assert_eq!(tree.edges().len(), 5);
/// # Ok::<(), taproot_core::MstError>(())
/// ```
#[instrument(
    name = "mst.kruskal",
    err,
    skip(edges),
    fields(edge_count = edges.len()),
)]
pub fn kruskal(node_count: usize, edges: &[Edge], sort: EdgeSort) -> Result<SpanningTree, MstError> {
    validate_edges(node_count, edges)?;
    ensure_connected(node_count, edges)?;

    let ordered = sorted_edges(edges, sort)?;
    let target_len = node_count - 1;
    let mut set = DisjointSet::new(node_count);
    let mut accepted = Vec::with_capacity(target_len);

    for edge in ordered {
        if accepted.len() == target_len {
            break;
        }
        let left = set.find_with_path_compression(edge.source())?;
        let right = set.find_with_path_compression(edge.target())?;
        if left != right {
            accepted.push(edge);
            set.union(left, right)?;
        }
    }

    let tree = SpanningTree::new(node_count, accepted);
    debug!(
        cost = tree.cost(),
        tree_edges = tree.edges().len(),
        "kruskal completed"
    );
    Ok(tree)
}

fn sorted_edges(edges: &[Edge], sort: EdgeSort) -> Result<Vec<Edge>, MstError> {
    let mut ordered = edges.to_vec();
    match sort {
        EdgeSort::Stable => {
            ordered.sort_by(|left, right| left.weight().total_cmp(&right.weight()));
        }
        EdgeSort::Heapsort => {
            heapsort(&mut ordered);
            ordered.reverse();
        }
        EdgeSort::Presorted => {
            if let Some(index) = ordered
                .windows(2)
                .position(|pair| pair[1].weight() < pair[0].weight())
            {
                return Err(MstError::UnsortedEdges { index: index + 1 });
            }
        }
    }
    Ok(ordered)
}
