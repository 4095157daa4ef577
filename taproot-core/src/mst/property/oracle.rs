//! Borůvka oracle for MST property verification.
//!
//! Shares no code with the engines under test: components are merged in
//! rounds, each component taking its cheapest outgoing edge. Ties are broken
//! by `(weight, edge index)` so a round can never close a cycle.

use std::cmp::Ordering;

use crate::Edge;

use super::helpers::find_root;

/// Result of the Borůvka oracle.
#[derive(Clone, Debug)]
pub(super) struct OracleResult {
    /// Total weight of the spanning forest, accumulated as `f64`.
    pub total_weight: f64,
    /// Number of edges in the spanning forest.
    pub edge_count: usize,
    /// Number of connected components.
    pub component_count: usize,
}

/// Computes a minimum spanning forest with Borůvka's algorithm.
///
/// Self-loops, out-of-range endpoints and non-finite weights are ignored.
pub(super) fn boruvka(node_count: usize, edges: &[Edge]) -> OracleResult {
    let mut parent: Vec<usize> = (0..node_count).collect();
    let mut result = OracleResult {
        total_weight: 0.0,
        edge_count: 0,
        component_count: node_count,
    };

    loop {
        let mut cheapest: Vec<Option<usize>> = vec![None; node_count];
        for (index, edge) in edges.iter().enumerate() {
            if is_ignored(edge, node_count) {
                continue;
            }
            let left = find_root(&mut parent, edge.source());
            let right = find_root(&mut parent, edge.target());
            if left == right {
                continue;
            }
            for root in [left, right] {
                let replace = cheapest[root].is_none_or(|best| {
                    compare(edges, index, best) == Ordering::Less
                });
                if replace {
                    cheapest[root] = Some(index);
                }
            }
        }

        let mut merged = false;
        for index in cheapest.into_iter().flatten() {
            let edge = edges[index];
            let left = find_root(&mut parent, edge.source());
            let right = find_root(&mut parent, edge.target());
            if left != right {
                parent[right] = left;
                result.total_weight += f64::from(edge.weight());
                result.edge_count += 1;
                result.component_count -= 1;
                merged = true;
            }
        }
        if !merged {
            return result;
        }
    }
}

fn is_ignored(edge: &Edge, node_count: usize) -> bool {
    edge.source() == edge.target()
        || edge.source() >= node_count
        || edge.target() >= node_count
        || !edge.weight().is_finite()
}

fn compare(edges: &[Edge], left: usize, right: usize) -> Ordering {
    edges[left]
        .weight()
        .total_cmp(&edges[right].weight())
        .then(left.cmp(&right))
}
