//! Vector sources feeding the compression pipeline.

use thiserror::Error;

use crate::error::define_error_codes;

/// Errors returned by [`VectorSource`] implementations.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum SourceError {
    /// A vector index was outside the source.
    #[error("index {index} is out of bounds for {len} vectors")]
    OutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of vectors in the source.
        len: usize,
    },
    /// A vector's length differs from the source dimension.
    #[error("vector {index} has length {actual}, expected {expected}")]
    DimensionMismatch {
        /// Offending vector.
        index: usize,
        /// Dimension of the source.
        expected: usize,
        /// Length of the offending vector.
        actual: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`SourceError`] variants.
    enum SourceErrorCode for SourceError {
        /// A vector index was outside the source.
        OutOfBounds => OutOfBounds { .. } => "SOURCE_OUT_OF_BOUNDS",
        /// A vector's length differs from the source dimension.
        DimensionMismatch => DimensionMismatch { .. } => "SOURCE_DIMENSION_MISMATCH",
    }
}

/// Abstraction over a collection of equal-length vectors.
///
/// # Examples
/// ```
/// use taproot_core::{SourceError, VectorSource};
///
/// struct Rows(Vec<[u8; 2]>);
///
/// impl VectorSource<u8> for Rows {
///     fn len(&self) -> usize { self.0.len() }
///     fn name(&self) -> &str { "rows" }
///     fn dimension(&self) -> usize { 2 }
///     fn vector(&self, index: usize) -> Result<&[u8], SourceError> {
///         self.0
///             .get(index)
///             .map(|row| row.as_slice())
///             .ok_or(SourceError::OutOfBounds { index, len: self.0.len() })
///     }
/// }
///
/// let rows = Rows(vec![[0, 1], [1, 1]]);
/// assert_eq!(rows.vector(1)?, [1, 1]);
/// assert_eq!(rows.to_vectors()?, vec![vec![0, 1], vec![1, 1]]);
/// # Ok::<(), SourceError>(())
/// ```
pub trait VectorSource<T> {
    /// Returns the number of vectors.
    fn len(&self) -> usize;

    /// Returns whether the source contains no vectors.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a human-readable name.
    fn name(&self) -> &str;

    /// Returns the length shared by every vector.
    fn dimension(&self) -> usize;

    /// Borrows the vector at `index`.
    ///
    /// # Errors
    /// Returns [`SourceError::OutOfBounds`] for an invalid index.
    fn vector(&self, index: usize) -> Result<&[T], SourceError>;

    /// Copies every vector out of the source.
    ///
    /// # Errors
    /// Returns any [`SourceError`] surfaced by [`VectorSource::vector`].
    fn to_vectors(&self) -> Result<Vec<Vec<T>>, SourceError>
    where
        T: Clone,
    {
        (0..self.len())
            .map(|index| self.vector(index).map(<[T]>::to_vec))
            .collect()
    }
}

/// An in-memory, validated collection of equal-length vectors.
///
/// # Examples
/// ```
/// use taproot_core::{VectorSet, VectorSource};
///
/// let set = VectorSet::new("bits", vec![vec![0, 1, 1], vec![1, 1, 0]])?;
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.dimension(), 3);
/// assert!(VectorSet::new("ragged", vec![vec![0, 1], vec![1]]).is_err());
/// # Ok::<(), taproot_core::SourceError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VectorSet<T> {
    name: String,
    dimension: usize,
    vectors: Vec<Vec<T>>,
}

impl<T> VectorSet<T> {
    /// Creates a set after checking that every vector has the length of the
    /// first one. An empty set has dimension zero.
    ///
    /// # Errors
    /// Returns [`SourceError::DimensionMismatch`] for a ragged collection.
    pub fn new(name: impl Into<String>, vectors: Vec<Vec<T>>) -> Result<Self, SourceError> {
        let dimension = vectors.first().map_or(0, Vec::len);
        if let Some((index, vector)) = vectors
            .iter()
            .enumerate()
            .find(|(_, vector)| vector.len() != dimension)
        {
            return Err(SourceError::DimensionMismatch {
                index,
                expected: dimension,
                actual: vector.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            dimension,
            vectors,
        })
    }

    /// Returns the vectors as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Vec<T>] {
        &self.vectors
    }

    /// Consumes the set, returning its vectors.
    #[must_use]
    pub fn into_vectors(self) -> Vec<Vec<T>> {
        self.vectors
    }
}

impl<T> VectorSource<T> for VectorSet<T> {
    fn len(&self) -> usize {
        self.vectors.len()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn vector(&self, index: usize) -> Result<&[T], SourceError> {
        self.vectors
            .get(index)
            .map(Vec::as_slice)
            .ok_or(SourceError::OutOfBounds {
                index,
                len: self.vectors.len(),
            })
    }
}

/// Unvalidated rows; the dimension is taken from the first row and ragged
/// rows surface as errors in consumers that compare lengths.
impl<T> VectorSource<T> for Vec<Vec<T>> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn name(&self) -> &str {
        "vectors"
    }

    fn dimension(&self) -> usize {
        self.first().map_or(0, Vec::len)
    }

    fn vector(&self, index: usize) -> Result<&[T], SourceError> {
        self.get(index).map(Vec::as_slice).ok_or(SourceError::OutOfBounds {
            index,
            len: self.as_slice().len(),
        })
    }
}
