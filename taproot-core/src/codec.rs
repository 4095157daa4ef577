//! Delta codec over a rooted tree of vectors.
//!
//! The centroid keeps its full vector. Every other node stores its parent id
//! and the `(position, value)` pairs where its vector differs from the
//! parent's. Decoding starts from the centroid and replays diffs from the
//! root down, so a position touched at several levels ends with the value of
//! the nearest ancestor.

use thiserror::Error;
use tracing::{debug, instrument};

use crate::{RootedTree, error::define_error_codes};

/// Errors returned while building or decoding a [`StorageMatrix`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum CodecError {
    /// There were no vectors to encode.
    #[error("cannot encode an empty vector collection")]
    EmptyInput,
    /// A vector's length differs from the first vector's.
    #[error("vector {node} has length {actual}, expected {expected}")]
    DimensionMismatch {
        /// Offending node.
        node: usize,
        /// Length of vector 0.
        expected: usize,
        /// Length of the offending vector.
        actual: usize,
    },
    /// The parent array does not cover every vector.
    #[error("parent array has {actual} entries for {expected} vectors")]
    ParentCountMismatch {
        /// Number of vectors.
        expected: usize,
        /// Number of parent entries.
        actual: usize,
    },
    /// A node id is outside the encoded collection.
    #[error("node {node} is out of range for node_count {node_count}")]
    InvalidNodeId {
        /// The invalid node id.
        node: usize,
        /// Number of encoded vectors.
        node_count: usize,
    },
    /// Following parents from `node` never reaches the centroid.
    #[error("parent chain from node {node} does not reach the centroid")]
    BrokenParentChain {
        /// Node whose chain is broken.
        node: usize,
    },
    /// A stored diff addresses a position past the vector length.
    #[error("diff for node {node} writes position {position}, dimension is {dimension}")]
    PositionOutOfRange {
        /// Node whose record holds the diff.
        node: usize,
        /// Offending position.
        position: usize,
        /// Vector length.
        dimension: usize,
    },
    /// A parent id or position does not fit in the scalar type of a
    /// flattened record.
    #[error("index {index} cannot be stored as a vector scalar")]
    IndexNotRepresentable {
        /// The index that failed to convert.
        index: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`CodecError`] variants.
    enum CodecErrorCode for CodecError {
        /// There were no vectors to encode.
        EmptyInput => EmptyInput => "CODEC_EMPTY_INPUT",
        /// A vector's length differs from the first vector's.
        DimensionMismatch => DimensionMismatch { .. } => "CODEC_DIMENSION_MISMATCH",
        /// The parent array does not cover every vector.
        ParentCountMismatch => ParentCountMismatch { .. } => "CODEC_PARENT_COUNT_MISMATCH",
        /// A node id is outside the encoded collection.
        InvalidNodeId => InvalidNodeId { .. } => "CODEC_INVALID_NODE_ID",
        /// Following parents never reaches the centroid.
        BrokenParentChain => BrokenParentChain { .. } => "CODEC_BROKEN_PARENT_CHAIN",
        /// A stored diff addresses a position past the vector length.
        PositionOutOfRange => PositionOutOfRange { .. } => "CODEC_POSITION_OUT_OF_RANGE",
        /// An index does not fit in the scalar type.
        IndexNotRepresentable => IndexNotRepresentable { .. } => "CODEC_INDEX_NOT_REPRESENTABLE",
    }
}

/// Positions where `target` differs from `base`, paired with `target`'s
/// value.
///
/// Only the common prefix is compared; callers encode equal-length vectors.
///
/// # Examples
/// ```
/// use taproot_core::codec::diff;
///
/// assert_eq!(diff(&[0, 0, 1], &[1, 0, 1]), [(0, 1)]);
/// assert!(diff(&[3, 4], &[3, 4]).is_empty());
/// ```
#[must_use]
pub fn diff<T: Clone + PartialEq>(base: &[T], target: &[T]) -> Vec<(usize, T)> {
    base.iter()
        .zip(target)
        .enumerate()
        .filter(|(_, (left, right))| left != right)
        .map(|(position, (_, value))| (position, value.clone()))
        .collect()
}

/// One entry of a [`StorageMatrix`].
///
/// In flattened form ([`StorageRecord::flattened`]) a reference record is its
/// vector and a delta record is `[parent, position, value, position, value,
/// ...]`.
///
/// # Examples
/// ```
/// use taproot_core::StorageRecord;
///
/// let record = StorageRecord::Delta { parent: 0, diffs: vec![(2, 1_u8)] };
/// assert_eq!(record.flattened()?, [0, 2, 1]);
/// assert_eq!(record.stored_len(), 3);
/// # Ok::<(), taproot_core::CodecError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StorageRecord<T> {
    /// The centroid's full vector.
    Reference(Vec<T>),
    /// A parent id plus the positions where this vector differs from it.
    Delta {
        /// Parent node in the rooted tree.
        parent: usize,
        /// `(position, value)` pairs in ascending position order.
        diffs: Vec<(usize, T)>,
    },
}

impl<T> StorageRecord<T> {
    /// Number of scalars this record occupies in flattened form: the full
    /// vector, or one parent slot plus two per diff pair.
    #[must_use]
    pub fn stored_len(&self) -> usize {
        match self {
            Self::Reference(vector) => vector.len(),
            Self::Delta { diffs, .. } => 1 + 2 * diffs.len(),
        }
    }
}

impl<T: Clone + TryFrom<usize>> StorageRecord<T> {
    /// Returns the scalar row this record occupies in storage.
    ///
    /// # Errors
    /// Returns [`CodecError::IndexNotRepresentable`] when the parent id or a
    /// position does not fit in `T`.
    pub fn flattened(&self) -> Result<Vec<T>, CodecError> {
        match self {
            Self::Reference(vector) => Ok(vector.clone()),
            Self::Delta { parent, diffs } => {
                let mut row = Vec::with_capacity(self.stored_len());
                row.push(index_scalar(*parent)?);
                for (position, value) in diffs {
                    row.push(index_scalar(*position)?);
                    row.push(value.clone());
                }
                Ok(row)
            }
        }
    }
}

fn index_scalar<T: TryFrom<usize>>(index: usize) -> Result<T, CodecError> {
    T::try_from(index).map_err(|_| CodecError::IndexNotRepresentable { index })
}

/// Delta-encoded vectors rooted at a centroid.
///
/// # Examples
/// ```
/// use taproot_core::{StorageMatrix, StorageRecord};
///
/// let vectors = vec![vec![0, 0, 0], vec![0, 0, 1], vec![1, 0, 1]];
/// let matrix = StorageMatrix::build(&vectors, &[None, Some(0), Some(1)], 0)?;
/// assert_eq!(
///     matrix.records()[2],
///     StorageRecord::Delta { parent: 1, diffs: vec![(0, 1)] }
/// );
/// assert_eq!(matrix.reconstruct(2)?, [1, 0, 1]);
/// # Ok::<(), taproot_core::CodecError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StorageMatrix<T> {
    centroid: usize,
    dimension: usize,
    records: Vec<StorageRecord<T>>,
}

impl<T: Clone + PartialEq> StorageMatrix<T> {
    /// Encodes `vectors` against the parent array of a tree rooted at
    /// `centroid`.
    ///
    /// `parents[centroid]` is ignored. Every other node must have a parent
    /// and following parents must reach `centroid` without revisiting a
    /// node.
    ///
    /// # Errors
    /// Returns [`CodecError::EmptyInput`], [`CodecError::ParentCountMismatch`],
    /// [`CodecError::InvalidNodeId`] for an out-of-range centroid or parent,
    /// [`CodecError::DimensionMismatch`], or
    /// [`CodecError::BrokenParentChain`] when a node lacks a parent or its
    /// chain cycles.
    #[instrument(
        name = "codec.build",
        err,
        skip(vectors, parents),
        fields(node_count = vectors.len()),
    )]
    pub fn build(
        vectors: &[Vec<T>],
        parents: &[Option<usize>],
        centroid: usize,
    ) -> Result<Self, CodecError> {
        let node_count = vectors.len();
        let dimension = vectors.first().ok_or(CodecError::EmptyInput)?.len();
        if parents.len() != node_count {
            return Err(CodecError::ParentCountMismatch {
                expected: node_count,
                actual: parents.len(),
            });
        }
        if centroid >= node_count {
            return Err(CodecError::InvalidNodeId {
                node: centroid,
                node_count,
            });
        }
        if let Some((node, vector)) = vectors
            .iter()
            .enumerate()
            .find(|(_, vector)| vector.len() != dimension)
        {
            return Err(CodecError::DimensionMismatch {
                node,
                expected: dimension,
                actual: vector.len(),
            });
        }
        check_parent_chains(parents, centroid)?;

        let records: Vec<StorageRecord<T>> = (0..node_count)
            .map(|node| match parents[node] {
                Some(parent) if node != centroid => StorageRecord::Delta {
                    parent,
                    diffs: diff(&vectors[parent], &vectors[node]),
                },
                _ => StorageRecord::Reference(vectors[node].clone()),
            })
            .collect();
        let matrix = Self {
            centroid,
            dimension,
            records,
        };
        debug!(
            stored = matrix.stored_len(),
            original = matrix.original_len(),
            "storage matrix built"
        );
        Ok(matrix)
    }

    /// Encodes `vectors` against a [`RootedTree`], using its root as the
    /// centroid.
    ///
    /// # Errors
    /// See [`StorageMatrix::build`].
    pub fn from_tree(vectors: &[Vec<T>], tree: &RootedTree) -> Result<Self, CodecError> {
        Self::build(vectors, tree.parents(), tree.root())
    }

    /// Decodes the vector of `node`.
    ///
    /// # Errors
    /// Returns [`CodecError::InvalidNodeId`] for an out-of-range node.
    pub fn reconstruct(&self, node: usize) -> Result<Vec<T>, CodecError> {
        let node_count = self.records.len();
        if node >= node_count {
            return Err(CodecError::InvalidNodeId { node, node_count });
        }
        let mut chain = Vec::new();
        let mut current = node;
        loop {
            match &self.records[current] {
                StorageRecord::Reference(vector) => {
                    let mut decoded = vector.clone();
                    for &link in chain.iter().rev() {
                        self.apply(link, &mut decoded)?;
                    }
                    return Ok(decoded);
                }
                StorageRecord::Delta { parent, .. } => {
                    if chain.len() == node_count {
                        return Err(CodecError::BrokenParentChain { node });
                    }
                    chain.push(current);
                    current = *parent;
                }
            }
        }
    }

    /// Decodes every vector, reusing decoded ancestors.
    ///
    /// # Errors
    /// See [`StorageMatrix::reconstruct`].
    pub fn reconstruct_all(&self) -> Result<Vec<Vec<T>>, CodecError> {
        let mut decoded: Vec<Option<Vec<T>>> = vec![None; self.records.len()];
        for node in 0..self.records.len() {
            let mut pending = Vec::new();
            let mut current = node;
            let mut vector = loop {
                if let Some(done) = &decoded[current] {
                    break done.clone();
                }
                match &self.records[current] {
                    StorageRecord::Reference(vector) => break vector.clone(),
                    StorageRecord::Delta { parent, .. } => {
                        if pending.len() == self.records.len() {
                            return Err(CodecError::BrokenParentChain { node });
                        }
                        pending.push(current);
                        current = *parent;
                    }
                }
            };
            decoded[current] = Some(vector.clone());
            for &link in pending.iter().rev() {
                self.apply(link, &mut vector)?;
                decoded[link] = Some(vector.clone());
            }
        }
        Ok(decoded.into_iter().flatten().collect())
    }

    fn apply(&self, node: usize, vector: &mut [T]) -> Result<(), CodecError> {
        if let StorageRecord::Delta { diffs, .. } = &self.records[node] {
            for (position, value) in diffs {
                let slot = vector
                    .get_mut(*position)
                    .ok_or(CodecError::PositionOutOfRange {
                        node,
                        position: *position,
                        dimension: self.dimension,
                    })?;
                *slot = value.clone();
            }
        }
        Ok(())
    }
}

impl<T: Clone + TryFrom<usize>> StorageMatrix<T> {
    /// Returns every record in flattened form, one row per node.
    ///
    /// # Errors
    /// Returns [`CodecError::IndexNotRepresentable`] when a parent id or a
    /// position does not fit in `T`.
    pub fn flattened(&self) -> Result<Vec<Vec<T>>, CodecError> {
        self.records.iter().map(StorageRecord::flattened).collect()
    }
}

impl<T> StorageMatrix<T> {
    /// Returns the centroid whose record holds a full vector.
    #[must_use]
    #[rustfmt::skip]
    pub fn centroid(&self) -> usize { self.centroid }

    /// Returns the length of every encoded vector.
    #[must_use]
    #[rustfmt::skip]
    pub fn dimension(&self) -> usize { self.dimension }

    /// Returns the number of encoded vectors.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.records.len() }

    /// Returns `true` when no vectors are encoded.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Returns the per-node records.
    #[must_use]
    #[rustfmt::skip]
    pub fn records(&self) -> &[StorageRecord<T>] { &self.records }

    /// Total scalars stored across all records.
    #[must_use]
    pub fn stored_len(&self) -> usize {
        self.records.iter().map(StorageRecord::stored_len).sum()
    }

    /// Scalars needed to store every vector in full.
    #[must_use]
    pub fn original_len(&self) -> usize {
        self.records.len() * self.dimension
    }

    /// Fraction of scalars saved, `1 - stored / original`. Negative when the
    /// encoding is larger than the input.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "storage sizes are reported as approximate ratios"
    )]
    pub fn storage_reduction(&self) -> f64 {
        let original = self.original_len();
        if original == 0 {
            return 0.0;
        }
        1.0 - self.stored_len() as f64 / original as f64
    }
}

/// Closed-form expected storage reduction, in percent, for `n` random
/// vectors of length `m` over an alphabet of `k` symbols:
/// `((m - 2) / m - (2·k^m + m - 3) / (m·n)) · 100`.
///
/// Returns `None` when `m` or `n` is zero.
///
/// # Examples
/// ```
/// use taproot_core::codec::estimated_reduction_percent;
///
/// let percent = estimated_reduction_percent(1000, 4, 2).expect("non-zero sizes");
/// assert!((percent - 49.175).abs() < 1e-9);
/// ```
#[must_use]
pub fn estimated_reduction_percent(n: u32, m: u32, k: u32) -> Option<f64> {
    if n == 0 || m == 0 {
        return None;
    }
    let (n, m, k) = (f64::from(n), f64::from(m), f64::from(k));
    let spread = (m - 2.0) / m;
    let overhead = (2.0 * k.powf(m) + m - 3.0) / (m * n);
    Some((spread - overhead) * 100.0)
}

/// Verifies that every non-centroid node has a parent chain ending at the
/// centroid. Runs in `O(n)` by marking nodes whose chain is known good.
fn check_parent_chains(parents: &[Option<usize>], centroid: usize) -> Result<(), CodecError> {
    let node_count = parents.len();
    let mut good = vec![false; node_count];
    good[centroid] = true;
    let mut on_path = vec![false; node_count];
    for node in 0..node_count {
        let mut path = Vec::new();
        let mut current = node;
        while !good[current] {
            if on_path[current] {
                return Err(CodecError::BrokenParentChain { node });
            }
            on_path[current] = true;
            path.push(current);
            current = match parents[current] {
                Some(parent) if parent < node_count => parent,
                Some(parent) => {
                    return Err(CodecError::InvalidNodeId {
                        node: parent,
                        node_count,
                    });
                }
                None => return Err(CodecError::BrokenParentChain { node: current }),
            };
        }
        for visited in path {
            good[visited] = true;
            on_path[visited] = false;
        }
    }
    Ok(())
}
