//! Binary min-heap over weighted edges.
//!
//! Layout: `parent(k) = (k - 1) / 2`, children of `k` at `2k + 1` and
//! `2k + 2`. Heap property: `weight(parent(k)) <= weight(k)` for every
//! `k > 0`. Only the weight participates in comparisons.
//!
//! The slice-level primitives ([`sift_up`], [`sift_down`], [`heapify`],
//! [`heapsort`]) operate on any edge slice; [`EdgeHeap`] owns a growable
//! sequence and layers insertion and removal on top of them. There is no
//! index map, so [`EdgeHeap::decrease_key`] and [`EdgeHeap::delete_at`]
//! expect the caller to know the position of the entry.

use thiserror::Error;

use crate::{Edge, error::define_error_codes};

/// Errors returned by [`EdgeHeap`] operations.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum HeapError {
    /// Extraction was attempted on an empty heap.
    #[error("cannot extract from an empty heap")]
    EmptyHeap,
    /// A positional operation referenced an index past the end of the heap.
    #[error("heap index {index} is out of range for length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Current heap length.
        len: usize,
    },
    /// `decrease_key` was asked to raise a weight.
    #[error("cannot decrease key at index {index} from {current} to larger value {requested}")]
    KeyIncrease {
        /// Index of the entry being updated.
        index: usize,
        /// Weight currently stored at `index`.
        current: f32,
        /// Requested replacement weight.
        requested: f32,
    },
}

define_error_codes! {
    /// Stable codes describing [`HeapError`] variants.
    enum HeapErrorCode for HeapError {
        /// Extraction was attempted on an empty heap.
        EmptyHeap => EmptyHeap => "HEAP_EMPTY",
        /// A positional operation referenced an index past the end of the heap.
        IndexOutOfRange => IndexOutOfRange { .. } => "HEAP_INDEX_OUT_OF_RANGE",
        /// `decrease_key` was asked to raise a weight.
        KeyIncrease => KeyIncrease { .. } => "HEAP_KEY_INCREASE",
    }
}

const fn parent(k: usize) -> usize {
    (k - 1) / 2
}

/// Moves the entry at `k` towards the root while its parent is heavier.
///
/// # Errors
/// Returns [`HeapError::IndexOutOfRange`] when `k >= seq.len()`.
pub fn sift_up(seq: &mut [Edge], k: usize) -> Result<(), HeapError> {
    if k >= seq.len() {
        return Err(HeapError::IndexOutOfRange {
            index: k,
            len: seq.len(),
        });
    }
    raise(seq, k);
    Ok(())
}

/// Moves the entry at `k` towards the leaves within the prefix `seq[..n]`.
///
/// The lighter child is chosen (left on ties) and swapped in while it is
/// strictly lighter than the entry being sifted.
///
/// # Errors
/// Returns [`HeapError::IndexOutOfRange`] when the prefix `n` is longer
/// than `seq` or `k` lies outside it.
pub fn sift_down(seq: &mut [Edge], k: usize, n: usize) -> Result<(), HeapError> {
    if n > seq.len() {
        return Err(HeapError::IndexOutOfRange {
            index: n,
            len: seq.len(),
        });
    }
    if k >= n {
        return Err(HeapError::IndexOutOfRange { index: k, len: n });
    }
    sink(seq, k, n);
    Ok(())
}

// `k < seq.len()`.
fn raise(seq: &mut [Edge], mut k: usize) {
    while k > 0 && seq[parent(k)].weight() > seq[k].weight() {
        seq.swap(k, parent(k));
        k = parent(k);
    }
}

// `k < n <= seq.len()`.
fn sink(seq: &mut [Edge], mut k: usize, n: usize) {
    loop {
        let left = 2 * k + 1;
        if left >= n {
            break;
        }
        let mut child = left;
        if left + 1 < n && seq[left].weight() > seq[left + 1].weight() {
            child = left + 1;
        }
        if seq[k].weight() <= seq[child].weight() {
            break;
        }
        seq.swap(k, child);
        k = child;
    }
}

/// Establishes the heap property over the whole slice in `O(n)`.
pub fn heapify(seq: &mut [Edge]) {
    let n = seq.len();
    for k in (0..n / 2).rev() {
        sink(seq, k, n);
    }
}

/// Sorts `seq` in place into **non-increasing** weight order.
///
/// The min-heap leaves the lightest entry at the end; callers wanting an
/// ascending order reverse the slice afterwards.
///
/// # Examples
/// ```
/// use taproot_core::{Edge, heap::heapsort};
///
/// let mut edges = vec![
///     Edge::new(0, 1, 5.0),
///     Edge::new(1, 2, 3.0),
///     Edge::new(2, 3, 4.0),
///     Edge::new(3, 0, 1.0),
/// ];
/// heapsort(&mut edges);
/// let weights: Vec<f32> = edges.iter().map(Edge::weight).collect();
/// assert_eq!(weights, [5.0, 4.0, 3.0, 1.0]);
/// ```
pub fn heapsort(seq: &mut [Edge]) {
    heapify(seq);
    for end in (1..seq.len()).rev() {
        seq.swap(0, end);
        sink(seq, 0, end);
    }
}

/// Returns `true` when `seq` satisfies the min-heap property.
#[must_use]
pub fn is_heap(seq: &[Edge]) -> bool {
    (1..seq.len()).all(|k| seq[parent(k)].weight() <= seq[k].weight())
}

/// An owned min-heap of edges keyed by weight.
///
/// # Examples
/// ```
/// use taproot_core::{Edge, EdgeHeap};
///
/// let mut heap = EdgeHeap::new();
/// heap.insert(Edge::new(0, 1, 4.0));
/// heap.insert(Edge::new(0, 2, 1.0));
/// heap.insert(Edge::new(1, 2, 3.0));
/// assert_eq!(heap.extract_min()?.weight(), 1.0);
/// assert_eq!(heap.len(), 2);
/// # Ok::<(), taproot_core::HeapError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeHeap {
    entries: Vec<Edge>,
}

impl EdgeHeap {
    /// Creates an empty heap.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds a heap from an arbitrary edge list in linear time.
    #[must_use]
    pub fn from_edges(mut entries: Vec<Edge>) -> Self {
        heapify(&mut entries);
        Self { entries }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the heap holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the lightest entry without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Edge> {
        self.entries.first()
    }

    /// Returns the entry stored at heap position `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Edge> {
        self.entries.get(index)
    }

    /// Returns the raw heap array.
    #[must_use]
    pub fn as_slice(&self) -> &[Edge] {
        &self.entries
    }

    /// Appends `edge` and restores the heap property.
    pub fn insert(&mut self, edge: Edge) {
        self.entries.push(edge);
        let last = self.entries.len() - 1;
        raise(&mut self.entries, last);
    }

    /// Removes and returns the lightest entry.
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyHeap`] when the heap holds no entries.
    pub fn extract_min(&mut self) -> Result<Edge, HeapError> {
        self.delete_at(0).map_err(|_| HeapError::EmptyHeap)
    }

    /// Removes and returns the entry at `index`.
    ///
    /// The entry is swapped with the last one, popped, and the replacement
    /// is sifted down from `index`.
    ///
    /// # Errors
    /// Returns [`HeapError::IndexOutOfRange`] when `index >= self.len()`.
    pub fn delete_at(&mut self, index: usize) -> Result<Edge, HeapError> {
        let len = self.entries.len();
        if index >= len {
            return Err(HeapError::IndexOutOfRange { index, len });
        }
        self.entries.swap(index, len - 1);
        let removed = self.entries.pop().ok_or(HeapError::EmptyHeap)?;
        let remaining = self.entries.len();
        if index < remaining {
            sink(&mut self.entries, index, remaining);
            raise(&mut self.entries, index);
        }
        Ok(removed)
    }

    /// Lowers the weight stored at `index` to `weight` and sifts it up.
    ///
    /// # Errors
    /// Returns [`HeapError::IndexOutOfRange`] for an invalid index and
    /// [`HeapError::KeyIncrease`] when `weight` exceeds the current weight.
    pub fn decrease_key(&mut self, index: usize, weight: f32) -> Result<(), HeapError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(HeapError::IndexOutOfRange { index, len })?;
        if weight > entry.weight() {
            return Err(HeapError::KeyIncrease {
                index,
                current: entry.weight(),
                requested: weight,
            });
        }
        entry.set_weight(weight);
        raise(&mut self.entries, index);
        Ok(())
    }

    /// Consumes the heap, returning its entries in non-increasing weight
    /// order.
    #[must_use]
    pub fn into_sorted_desc(mut self) -> Vec<Edge> {
        heapsort(&mut self.entries);
        self.entries
    }
}
