//! Prim's algorithm, naive and heap-backed.

use tracing::{debug, instrument};

use crate::{AdjacencyList, Edge, EdgeHeap};

use super::{MstError, SpanningTree, disconnection, validate_adjacency};

/// Rule applied when several candidate edges share the minimum weight.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TieBreak {
    /// Take the first minimum-weight candidate encountered.
    Minimum,
    /// Among minimum-weight candidates, take the one whose new endpoint has
    /// the largest adjacency degree; the first one wins on equal degrees.
    #[default]
    Shallow,
}

/// Naive Prim: each step scans every edge leaving the visited set.
///
/// Visited nodes are scanned in visitation order and their neighbours in
/// adjacency order, so ties under [`TieBreak::Minimum`] go to the first
/// candidate in that order. Accepted edges point from the visited endpoint
/// to the newly visited one.
///
/// # Errors
/// Returns [`MstError::EmptyGraph`], [`MstError::InvalidNodeId`] for an
/// out-of-range `start`, [`MstError::NonFiniteWeight`],
/// [`MstError::DisconnectedGraph`] or, for a directed list whose edges lead
/// away from some nodes, [`MstError::UnreachableNodes`].
#[instrument(
    name = "mst.prim",
    err,
    skip(adj),
    fields(node_count = adj.node_count()),
)]
pub fn prim(adj: &AdjacencyList, start: usize, tie_break: TieBreak) -> Result<SpanningTree, MstError> {
    validate_adjacency(adj, start)?;
    let node_count = adj.node_count();
    let mut visited = vec![false; node_count];
    let mut order = Vec::with_capacity(node_count);
    let mut accepted = Vec::with_capacity(node_count - 1);
    visited[start] = true;
    order.push(start);

    while order.len() < node_count {
        let mut best: Option<(Edge, usize)> = None;
        for &from in &order {
            for entry in adj.neighbours(from) {
                let to = entry.node();
                if visited[to] {
                    continue;
                }
                let degree = adj.degree(to);
                let take = match best {
                    None => true,
                    Some((current, best_degree)) => {
                        entry.weight() < current.weight()
                            || (tie_break == TieBreak::Shallow
                                && entry.weight() == current.weight()
                                && degree > best_degree)
                    }
                };
                if take {
                    best = Some((Edge::new(from, to, entry.weight()), degree));
                }
            }
        }
        let Some((edge, _)) = best else {
            return Err(disconnection(adj, start, node_count - order.len())?);
        };
        visited[edge.target()] = true;
        order.push(edge.target());
        accepted.push(edge);
    }

    let tree = SpanningTree::new(node_count, accepted);
    debug!(cost = tree.cost(), "prim completed");
    Ok(tree)
}

/// Heap-backed Prim with a lazy-deletion fringe.
///
/// The fringe holds every edge pushed from a visited node. Entries whose
/// target has since been visited are discarded when they surface.
///
/// Under [`TieBreak::Shallow`] the heap array is scanned from the root while
/// entries share the root weight; stale entries are skipped and the first
/// entry whose target has the strictly largest degree is removed. The scan
/// follows array order, so it sees only the equal-weight prefix of the heap
/// layout rather than every tied entry.
///
/// # Errors
/// Same as [`prim`]; additionally propagates [`MstError::Heap`] with
/// [`crate::HeapError::EmptyHeap`] if the fringe runs dry before the tree is
/// complete.
///
/// # Examples
/// ```
/// use taproot_core::{AdjacencyList, Edge, TieBreak, prim_heap};
///
/// let adj = AdjacencyList::undirected(4, &[
///     Edge::new(0, 1, 1.0),
///     Edge::new(1, 2, 1.0),
///     Edge::new(2, 3, 1.0),
///     Edge::new(0, 3, 5.0),
/// ])?;
/// let tree = prim_heap(&adj, 0, TieBreak::Shallow)?;
/// assert_eq!(tree.cost(), 3.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "mst.prim_heap",
    err,
    skip(adj),
    fields(node_count = adj.node_count()),
)]
pub fn prim_heap(
    adj: &AdjacencyList,
    start: usize,
    tie_break: TieBreak,
) -> Result<SpanningTree, MstError> {
    validate_adjacency(adj, start)?;
    let node_count = adj.node_count();
    let mut visited = vec![false; node_count];
    let mut accepted = Vec::with_capacity(node_count - 1);
    let mut fringe = EdgeHeap::new();
    let mut stale = 0_usize;
    visit(adj, start, &mut visited, &mut fringe);

    while accepted.len() + 1 < node_count {
        let edge = match tie_break {
            TieBreak::Shallow => match shallow_index(&fringe, adj, &visited) {
                Some(index) => fringe.delete_at(index)?,
                None => fringe.extract_min()?,
            },
            TieBreak::Minimum => fringe.extract_min()?,
        };
        if visited[edge.target()] {
            stale += 1;
            continue;
        }
        accepted.push(edge);
        visit(adj, edge.target(), &mut visited, &mut fringe);
    }

    let tree = SpanningTree::new(node_count, accepted);
    debug!(cost = tree.cost(), stale, "prim_heap completed");
    Ok(tree)
}

fn visit(adj: &AdjacencyList, node: usize, visited: &mut [bool], fringe: &mut EdgeHeap) {
    visited[node] = true;
    for entry in adj.neighbours(node) {
        if !visited[entry.node()] {
            fringe.insert(Edge::new(node, entry.node(), entry.weight()));
        }
    }
}

/// Picks the fringe position to remove under [`TieBreak::Shallow`].
///
/// Returns `None` for an empty fringe; falls back to the root when every
/// tied entry is stale.
fn shallow_index(fringe: &EdgeHeap, adj: &AdjacencyList, visited: &[bool]) -> Option<usize> {
    let root = fringe.peek()?;
    let min = root.weight();
    let mut best: Option<(usize, usize)> = None;
    for (index, entry) in fringe
        .as_slice()
        .iter()
        .enumerate()
        .take_while(|(_, entry)| entry.weight() == min)
    {
        if visited[entry.target()] {
            continue;
        }
        let degree = adj.degree(entry.target());
        if best.is_none_or(|(_, best_degree)| degree > best_degree) {
            best = Some((index, degree));
        }
    }
    Some(best.map_or(0, |(index, _)| index))
}
