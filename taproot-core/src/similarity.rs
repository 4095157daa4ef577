//! Pairwise Hamming similarity graph.
//!
//! With the `parallel` feature (on by default) rows of the pair matrix are
//! computed on the rayon thread pool. Output order is identical either way:
//! pairs `(i, j)` with `i < j`, in row-major order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::{Edge, SourceError, VectorSource, error::define_error_codes};

/// Errors returned while building the similarity graph.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum SimilarityError {
    /// The source contained no vectors.
    #[error("cannot build a similarity graph from an empty source")]
    EmptySource,
    /// Two compared vectors have different lengths.
    #[error("vector {index} has length {actual}, expected {expected}")]
    LengthMismatch {
        /// Index of the offending vector; `1` for the second argument of a
        /// pairwise comparison.
        index: usize,
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },
    /// A Hamming distance cannot be represented exactly as an edge weight.
    #[error("distance {distance} exceeds the exact f32 integer range")]
    DistanceTooLarge {
        /// The distance that overflowed.
        distance: usize,
    },
    /// Reading a vector failed.
    #[error(transparent)]
    Source(#[from] SourceError),
}

define_error_codes! {
    /// Stable codes describing [`SimilarityError`] variants.
    enum SimilarityErrorCode for SimilarityError {
        /// The source contained no vectors.
        EmptySource => EmptySource => "SIMILARITY_EMPTY_SOURCE",
        /// Two compared vectors have different lengths.
        LengthMismatch => LengthMismatch { .. } => "SIMILARITY_LENGTH_MISMATCH",
        /// A Hamming distance cannot be represented exactly as an edge weight.
        DistanceTooLarge => DistanceTooLarge { .. } => "SIMILARITY_DISTANCE_TOO_LARGE",
        /// Reading a vector failed.
        SourceFailure => Source(..) => "SIMILARITY_SOURCE_FAILURE",
    }
}

/// Largest integer `f32` represents exactly.
const MAX_EXACT_WEIGHT: usize = 1 << f32::MANTISSA_DIGITS;

fn check_lengths<T>(left: &[T], right: &[T]) -> Result<(), SimilarityError> {
    if left.len() == right.len() {
        Ok(())
    } else {
        Err(SimilarityError::LengthMismatch {
            index: 1,
            expected: left.len(),
            actual: right.len(),
        })
    }
}

/// Counts the positions where `left` and `right` differ.
///
/// # Errors
/// Returns [`SimilarityError::LengthMismatch`] when the lengths differ.
///
/// # Examples
/// ```
/// use taproot_core::hamming_distance;
///
/// assert_eq!(hamming_distance(&[0, 1, 1, 0], &[1, 1, 0, 0])?, 2);
/// # Ok::<(), taproot_core::SimilarityError>(())
/// ```
pub fn hamming_distance<T: PartialEq>(left: &[T], right: &[T]) -> Result<usize, SimilarityError> {
    check_lengths(left, right)?;
    Ok(count_differences(left, right))
}

fn count_differences<T: PartialEq>(left: &[T], right: &[T]) -> usize {
    left.iter().zip(right).filter(|(a, b)| a != b).count()
}

/// Returns a `0`/`1` mask with `1` wherever `left` and `right` differ.
///
/// # Errors
/// Returns [`SimilarityError::LengthMismatch`] when the lengths differ.
///
/// # Examples
/// ```
/// use taproot_core::diff_mask;
///
/// assert_eq!(diff_mask(&['a', 'c', 'g'], &['a', 't', 'g'])?, [0, 1, 0]);
/// # Ok::<(), taproot_core::SimilarityError>(())
/// ```
pub fn diff_mask<T: PartialEq>(left: &[T], right: &[T]) -> Result<Vec<u8>, SimilarityError> {
    check_lengths(left, right)?;
    Ok(left
        .iter()
        .zip(right)
        .map(|(a, b)| u8::from(a != b))
        .collect())
}

/// Builds the complete similarity graph over `source`: one edge `(i, j, d)`
/// per unordered pair `i < j`, where `d` is the Hamming distance.
///
/// # Errors
/// Returns [`SimilarityError::EmptySource`] for an empty source,
/// [`SimilarityError::LengthMismatch`] when a vector's length differs from
/// the source dimension, and [`SimilarityError::Source`] when a vector cannot
/// be read.
///
/// # Examples
/// ```
/// use taproot_core::{Edge, hamming_edges};
///
/// let vectors = vec![vec![0, 0, 0], vec![0, 0, 1], vec![1, 0, 1]];
/// let edges = hamming_edges(&vectors)?;
/// assert_eq!(
///     edges,
///     [Edge::new(0, 1, 1.0), Edge::new(0, 2, 2.0), Edge::new(1, 2, 1.0)]
/// );
/// # Ok::<(), taproot_core::SimilarityError>(())
/// ```
#[instrument(
    name = "similarity.hamming_edges",
    err,
    skip(source),
    fields(source = source.name(), vectors = source.len()),
)]
pub fn hamming_edges<T, S>(source: &S) -> Result<Vec<Edge>, SimilarityError>
where
    T: PartialEq + Sync,
    S: VectorSource<T> + ?Sized,
{
    if source.is_empty() {
        return Err(SimilarityError::EmptySource);
    }
    let dimension = source.dimension();
    if dimension >= MAX_EXACT_WEIGHT {
        return Err(SimilarityError::DistanceTooLarge {
            distance: dimension,
        });
    }
    let rows = (0..source.len())
        .map(|index| {
            let row = source.vector(index)?;
            if row.len() == dimension {
                Ok(row)
            } else {
                Err(SimilarityError::LengthMismatch {
                    index,
                    expected: dimension,
                    actual: row.len(),
                })
            }
        })
        .collect::<Result<Vec<&[T]>, SimilarityError>>()?;

    let edges = pair_edges(&rows);
    debug!(edges = edges.len(), "similarity graph built");
    Ok(edges)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "distances are bounded by MAX_EXACT_WEIGHT and convert exactly"
)]
fn row_edges<'a, T: PartialEq>(rows: &'a [&'a [T]], i: usize) -> impl Iterator<Item = Edge> + 'a {
    (i + 1..rows.len())
        .map(move |j| Edge::new(i, j, count_differences(rows[i], rows[j]) as f32))
}

#[cfg(feature = "parallel")]
fn pair_edges<T: PartialEq + Sync>(rows: &[&[T]]) -> Vec<Edge> {
    (0..rows.len())
        .into_par_iter()
        .flat_map_iter(|i| row_edges(rows, i))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn pair_edges<T: PartialEq + Sync>(rows: &[&[T]]) -> Vec<Edge> {
    (0..rows.len()).flat_map(|i| row_edges(rows, i)).collect()
}
