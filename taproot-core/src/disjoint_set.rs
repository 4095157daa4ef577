//! Union-find (disjoint set union) used for cycle detection in Kruskal.
//!
//! Unions are ranked by tree height and lookups may compress paths. The
//! structure is transient: every MST run owns a fresh instance.

use thiserror::Error;
use tracing::warn;

use crate::{Edge, error::define_error_codes};

/// Errors returned by [`DisjointSet`] operations and [`count_components`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum DisjointSetError {
    /// A node id is outside `0..node_count`.
    #[error("node {node} is out of range for node_count {node_count}")]
    InvalidNodeId {
        /// The invalid node id.
        node: usize,
        /// Number of tracked nodes.
        node_count: usize,
    },
    /// `union` received a node that is not the representative of its set.
    #[error("node {node} is not a representative; its set is led by {representative}")]
    NotRepresentative {
        /// The node passed to `union`.
        node: usize,
        /// The representative of its set.
        representative: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`DisjointSetError`] variants.
    enum DisjointSetErrorCode for DisjointSetError {
        /// A node id is outside `0..node_count`.
        InvalidNodeId => InvalidNodeId { .. } => "DISJOINT_SET_INVALID_NODE_ID",
        /// `union` received a node that is not a representative.
        NotRepresentative => NotRepresentative { .. } => "DISJOINT_SET_NOT_REPRESENTATIVE",
    }
}

/// Representative (`boss`) and height tables over `0..node_count`.
///
/// # Examples
/// ```
/// use taproot_core::DisjointSet;
///
/// let mut set = DisjointSet::new(4);
/// let (a, b) = (set.find(0)?, set.find(1)?);
/// assert!(set.union(a, b)?);
/// assert_eq!(set.find_with_path_compression(0)?, set.find_with_path_compression(1)?);
/// assert_ne!(set.find(0)?, set.find(2)?);
/// # Ok::<(), taproot_core::DisjointSetError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DisjointSet {
    boss: Vec<usize>,
    height: Vec<usize>,
}

impl DisjointSet {
    /// Creates `node_count` singleton sets: every node is its own boss and
    /// every height is zero.
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        Self {
            boss: (0..node_count).collect(),
            height: vec![0; node_count],
        }
    }

    /// Returns the number of nodes tracked by the structure.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boss.len()
    }

    /// Returns `true` when no nodes are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boss.is_empty()
    }

    fn boss_of(&self, node: usize) -> Result<usize, DisjointSetError> {
        self.boss
            .get(node)
            .copied()
            .ok_or(DisjointSetError::InvalidNodeId {
                node,
                node_count: self.boss.len(),
            })
    }

    /// Returns the height recorded for `node`; only meaningful at
    /// representatives.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::InvalidNodeId`] when `node` is out of range.
    pub fn height(&self, node: usize) -> Result<usize, DisjointSetError> {
        self.height
            .get(node)
            .copied()
            .ok_or(DisjointSetError::InvalidNodeId {
                node,
                node_count: self.height.len(),
            })
    }

    /// Follows boss links to the representative of `node` without mutating
    /// the structure.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::InvalidNodeId`] when `node` is out of range.
    pub fn find(&self, node: usize) -> Result<usize, DisjointSetError> {
        let mut represent = node;
        let mut boss = self.boss_of(represent)?;
        while represent != boss {
            represent = boss;
            boss = self.boss_of(represent)?;
        }
        Ok(represent)
    }

    /// Finds the representative of `node` and rewrites every visited boss
    /// link to point straight at it.
    ///
    /// Calling this on a representative is a no-op returning the node itself.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::InvalidNodeId`] when `node` is out of range.
    pub fn find_with_path_compression(&mut self, node: usize) -> Result<usize, DisjointSetError> {
        let root = self.find(node)?;
        let mut current = node;
        while let Some(slot) = self.boss.get_mut(current)
            && *slot != current
        {
            current = std::mem::replace(slot, root);
        }
        Ok(root)
    }

    fn ensure_representative(&self, node: usize) -> Result<(), DisjointSetError> {
        match self.find(node)? {
            representative if representative == node => Ok(()),
            representative => Err(DisjointSetError::NotRepresentative {
                node,
                representative,
            }),
        }
    }

    /// Merges the sets represented by `left` and `right`.
    ///
    /// The shorter tree is attached below the taller one; on equal heights
    /// `left` goes below `right` and `right` grows by one. Returns
    /// `Ok(false)` without touching the structure when both handles name the
    /// same representative.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::InvalidNodeId`] for an out-of-range node
    /// and [`DisjointSetError::NotRepresentative`] when either argument is
    /// not the representative of its set.
    pub fn union(&mut self, left: usize, right: usize) -> Result<bool, DisjointSetError> {
        self.ensure_representative(left)?;
        self.ensure_representative(right)?;
        if left == right {
            warn!(node = left, "redundant union: nodes already share a representative");
            return Ok(false);
        }
        let (left_height, right_height) = (self.height(left)?, self.height(right)?);
        let (child, parent) = if left_height > right_height {
            (right, left)
        } else {
            (left, right)
        };
        if let Some(slot) = self.boss.get_mut(child) {
            *slot = parent;
        }
        if left_height == right_height
            && let Some(slot) = self.height.get_mut(right)
        {
            *slot = right_height.saturating_add(1);
        }
        Ok(true)
    }

    /// Unions the representatives of `left` and `right`, compressing paths on
    /// the way. Returns `Ok(true)` when two distinct sets were merged.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::InvalidNodeId`] for an out-of-range node.
    pub fn union_nodes(&mut self, left: usize, right: usize) -> Result<bool, DisjointSetError> {
        let left_root = self.find_with_path_compression(left)?;
        let right_root = self.find_with_path_compression(right)?;
        if left_root == right_root {
            return Ok(false);
        }
        self.union(left_root, right_root)
    }
}

/// Counts connected components of the graph over `0..node_count` spanned by
/// `edges`.
///
/// # Errors
/// Returns [`DisjointSetError::InvalidNodeId`] when an edge references a node
/// outside the range.
///
/// # Examples
/// ```
/// use taproot_core::{Edge, count_components};
///
/// let edges = [Edge::unweighted(0, 1), Edge::unweighted(2, 3)];
/// assert_eq!(count_components(5, &edges)?, 3);
/// # Ok::<(), taproot_core::DisjointSetError>(())
/// ```
pub fn count_components(node_count: usize, edges: &[Edge]) -> Result<usize, DisjointSetError> {
    let mut set = DisjointSet::new(node_count);
    let mut components = node_count;
    for edge in edges {
        if set.union_nodes(edge.source(), edge.target())? {
            components -= 1;
        }
    }
    Ok(components)
}
