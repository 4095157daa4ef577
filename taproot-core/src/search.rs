//! Marked-node graph search producing a predecessor labelling.

use std::collections::VecDeque;

use crate::{AdjacencyList, GraphError};

/// Frontier discipline used by [`label_node_search`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SearchOrder {
    /// Expand the oldest frontier node first.
    #[default]
    Breadth,
    /// Expand the newest frontier node first.
    Depth,
}

/// Labels every node reachable from `source` with the node it was discovered
/// from.
///
/// The returned vector holds `Some(predecessor)` for each discovered node and
/// `None` for `source` itself and for unreached nodes. When `target` is
/// given, the search stops as soon as it is labelled, so the path back to
/// `source` can be read off the predecessor chain.
///
/// # Errors
/// Returns [`GraphError::InvalidNodeId`] when `source` or `target` is not a
/// node of `adj`.
///
/// # Examples
/// ```
/// use taproot_core::{AdjacencyList, Edge, SearchOrder, label_node_search};
///
/// let adj = AdjacencyList::undirected(4, &[
///     Edge::unweighted(0, 1),
///     Edge::unweighted(1, 2),
///     Edge::unweighted(2, 3),
/// ])?;
/// let pred = label_node_search(&adj, 0, Some(3), SearchOrder::Breadth)?;
/// assert_eq!(pred, [None, Some(0), Some(1), Some(2)]);
/// # Ok::<(), taproot_core::GraphError>(())
/// ```
pub fn label_node_search(
    adj: &AdjacencyList,
    source: usize,
    target: Option<usize>,
    order: SearchOrder,
) -> Result<Vec<Option<usize>>, GraphError> {
    let node_count = adj.node_count();
    if let Some(node) = [Some(source), target]
        .into_iter()
        .flatten()
        .find(|&node| !adj.contains(node))
    {
        return Err(GraphError::InvalidNodeId { node, node_count });
    }
    let mut pred = vec![None; node_count];
    let mut marked = vec![false; node_count];
    marked[source] = true;
    let mut frontier = VecDeque::from([source]);

    loop {
        let current = match order {
            SearchOrder::Breadth => frontier.front(),
            SearchOrder::Depth => frontier.back(),
        };
        let Some(&node) = current else {
            break;
        };
        let next = adj
            .neighbours(node)
            .iter()
            .map(|entry| entry.node())
            .find(|&candidate| !marked[candidate]);
        match next {
            Some(trial) => {
                marked[trial] = true;
                pred[trial] = Some(node);
                frontier.push_back(trial);
                if target == Some(trial) {
                    break;
                }
            }
            None => {
                let _ = match order {
                    SearchOrder::Breadth => frontier.pop_front(),
                    SearchOrder::Depth => frontier.pop_back(),
                };
            }
        }
    }
    Ok(pred)
}
