//! Compression pipeline orchestration.
//!
//! [`Taproot::compress`] runs the stages in order: Hamming similarity graph,
//! minimum spanning tree, centroid search, rooting at the centroid and delta
//! encoding. Stage failures are wrapped into [`TaprootError`].

use tracing::{info, instrument, warn};

use crate::{
    CodecError, EdgeSort, MstAlgorithm, MstOptions, Result, RootedTree, SpanningTree,
    StorageMatrix, TieBreak, VectorSource, direct_out_tree, error::TaprootError, find_centroid,
    hamming_edges, minimum_spanning_tree,
};

/// Entry point for running the compression pipeline.
///
/// # Examples
/// ```
/// use taproot_core::{TaprootBuilder, VectorSet};
///
/// let vectors = VectorSet::new(
///     "chain",
///     vec![vec![0, 0, 0], vec![0, 0, 1], vec![1, 0, 1]],
/// )?;
/// let taproot = TaprootBuilder::new().build()?;
/// let compression = taproot.compress(&vectors)?;
/// assert_eq!(compression.centroid(), 1);
/// assert_eq!(compression.spanning_tree().cost(), 2.0);
/// assert_eq!(compression.reconstruct_all()?, vectors.as_slice());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Taproot {
    options: MstOptions,
}

impl Taproot {
    pub(crate) fn new(options: MstOptions) -> Self {
        Self { options }
    }

    /// Returns the configured MST engine.
    ///
    /// # Examples
    /// ```
    /// use taproot_core::{MstAlgorithm, TaprootBuilder};
    ///
    /// let taproot = TaprootBuilder::new()
    ///     .with_algorithm(MstAlgorithm::Kruskal)
    ///     .build()
    ///     .expect("Kruskal with stable sorting is valid");
    /// assert_eq!(taproot.algorithm(), MstAlgorithm::Kruskal);
    /// ```
    #[must_use]
    pub fn algorithm(&self) -> MstAlgorithm {
        self.options.algorithm
    }

    /// Returns the tie-break used by the Prim engines.
    #[must_use]
    pub fn tie_break(&self) -> TieBreak {
        self.options.tie_break
    }

    /// Returns the edge ordering strategy used by Kruskal.
    #[must_use]
    pub fn edge_sort(&self) -> EdgeSort {
        self.options.edge_sort
    }

    /// Returns the configured start node.
    #[must_use]
    pub fn start(&self) -> usize {
        self.options.start
    }

    /// Returns the full MST configuration.
    #[must_use]
    pub fn options(&self) -> MstOptions {
        self.options
    }

    /// Compresses every vector in `source` into a [`Compression`].
    ///
    /// # Errors
    /// Returns [`TaprootError::EmptySource`] when the source is empty,
    /// [`TaprootError::InvalidStartNode`] when the configured start node is
    /// out of range, and the wrapped stage error when any pipeline stage
    /// fails.
    pub fn compress<T, S>(&self, source: &S) -> Result<Compression<T>>
    where
        T: Clone + PartialEq + Sync,
        S: VectorSource<T> + ?Sized,
    {
        let items = source.len();
        self.compress_with_len(source, items)
    }

    #[instrument(
        name = "taproot.compress",
        err,
        skip(self, source),
        fields(
            source = %source.name(),
            items = items,
            dimension = source.dimension(),
            algorithm = ?self.options.algorithm,
            tie_break = ?self.options.tie_break,
        ),
    )]
    fn compress_with_len<T, S>(&self, source: &S, items: usize) -> Result<Compression<T>>
    where
        T: Clone + PartialEq + Sync,
        S: VectorSource<T> + ?Sized,
    {
        if items == 0 {
            warn!(source = source.name(), "vector source is empty, returning error");
            return Err(TaprootError::EmptySource {
                source_name: source.name().to_owned(),
            });
        }
        let start = self.options.start;
        if start >= items {
            return Err(TaprootError::InvalidStartNode {
                start,
                node_count: items,
            });
        }

        let edges = hamming_edges(source)?;
        let spanning_tree = minimum_spanning_tree(items, &edges, self.options)?;
        let undirected = spanning_tree.adjacency_list();
        let centroid = find_centroid(&undirected, start)?;
        let rooted_tree = direct_out_tree(&undirected, centroid)?;
        let vectors = source.to_vectors()?;
        let matrix = StorageMatrix::from_tree(&vectors, &rooted_tree)?;

        info!(
            cost = spanning_tree.cost(),
            centroid,
            height = rooted_tree.height(),
            stored = matrix.stored_len(),
            original = matrix.original_len(),
            "compression completed"
        );
        Ok(Compression {
            source_name: source.name().to_owned(),
            spanning_tree,
            rooted_tree,
            matrix,
        })
    }
}

/// Output of [`Taproot::compress`]: the spanning tree, its rooting at the
/// centroid and the delta-encoded storage matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Compression<T> {
    source_name: String,
    spanning_tree: SpanningTree,
    rooted_tree: RootedTree,
    matrix: StorageMatrix<T>,
}

impl<T: Clone + PartialEq> Compression<T> {
    /// Name of the compressed source.
    #[must_use]
    #[rustfmt::skip]
    pub fn source_name(&self) -> &str { &self.source_name }

    /// Undirected minimum spanning tree over the similarity graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn spanning_tree(&self) -> &SpanningTree { &self.spanning_tree }

    /// The spanning tree directed away from the centroid.
    #[must_use]
    #[rustfmt::skip]
    pub fn rooted_tree(&self) -> &RootedTree { &self.rooted_tree }

    /// The delta-encoded storage matrix.
    #[must_use]
    #[rustfmt::skip]
    pub fn matrix(&self) -> &StorageMatrix<T> { &self.matrix }

    /// Node stored verbatim as the reference vector.
    #[must_use]
    #[rustfmt::skip]
    pub fn centroid(&self) -> usize { self.rooted_tree.root() }

    /// Number of compressed vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    /// Returns whether no vectors were compressed. Always `false` for a
    /// successful run.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// Mean Hamming distance along the tree edges, `None` for a single
    /// vector.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "edge counts stay far below 2^52"
    )]
    pub fn mean_edge_distance(&self) -> Option<f64> {
        let edges = self.spanning_tree.edges().len();
        (edges > 0).then(|| self.spanning_tree.cost() / edges as f64)
    }

    /// Decodes the vector of `node`.
    ///
    /// # Errors
    /// Returns [`TaprootError::Codec`] for an out-of-range node.
    pub fn reconstruct(&self, node: usize) -> Result<Vec<T>> {
        Ok(self.matrix.reconstruct(node)?)
    }

    /// Decodes every vector in node order.
    ///
    /// # Errors
    /// Returns [`TaprootError::Codec`] when the matrix is inconsistent.
    pub fn reconstruct_all(&self) -> Result<Vec<Vec<T>>> {
        self.matrix.reconstruct_all().map_err(TaprootError::from)
    }

    /// Lists the nodes whose decoded vector differs from `expected`.
    ///
    /// # Errors
    /// Returns [`TaprootError::Codec`] with
    /// [`CodecError::ParentCountMismatch`] when `expected` holds a different
    /// number of vectors, or any reconstruction error.
    pub fn mismatches(&self, expected: &[Vec<T>]) -> Result<Vec<usize>> {
        if expected.len() != self.matrix.len() {
            return Err(CodecError::ParentCountMismatch {
                expected: self.matrix.len(),
                actual: expected.len(),
            }
            .into());
        }
        let decoded = self.reconstruct_all()?;
        Ok(decoded
            .iter()
            .zip(expected)
            .enumerate()
            .filter_map(|(node, (got, want))| (got != want).then_some(node))
            .collect())
    }
}
