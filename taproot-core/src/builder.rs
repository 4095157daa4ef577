//! Builder for configuring [`Taproot`] compression runs.
//!
//! Collects the MST engine selection and its knobs, then validates the
//! combination before handing out a [`Taproot`] instance.

use crate::{
    EdgeSort, MstAlgorithm, MstOptions, Result, TieBreak, error::TaprootError, taproot::Taproot,
};

/// Configures and constructs [`Taproot`] instances.
///
/// # Examples
/// ```
/// use taproot_core::{MstAlgorithm, TaprootBuilder, TieBreak};
///
/// let taproot = TaprootBuilder::new()
///     .with_algorithm(MstAlgorithm::Prim)
///     .with_tie_break(TieBreak::Minimum)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(taproot.algorithm(), MstAlgorithm::Prim);
/// assert_eq!(taproot.tie_break(), TieBreak::Minimum);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TaprootBuilder {
    options: MstOptions,
}

impl TaprootBuilder {
    /// Creates a builder populated with default parameters: heap-based Prim
    /// with the shallow tie-break, starting from node `0`.
    ///
    /// # Examples
    /// ```
    /// use taproot_core::{MstAlgorithm, TaprootBuilder, TieBreak};
    ///
    /// let builder = TaprootBuilder::new();
    /// assert_eq!(builder.algorithm(), MstAlgorithm::PrimHeap);
    /// assert_eq!(builder.tie_break(), TieBreak::Shallow);
    /// assert_eq!(builder.start(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the MST engine.
    ///
    /// # Examples
    /// ```
    /// use taproot_core::{MstAlgorithm, TaprootBuilder};
    ///
    /// let builder = TaprootBuilder::new().with_algorithm(MstAlgorithm::Kruskal);
    /// assert_eq!(builder.algorithm(), MstAlgorithm::Kruskal);
    /// ```
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: MstAlgorithm) -> Self {
        self.options.algorithm = algorithm;
        self
    }

    /// Returns the configured MST engine.
    #[must_use]
    pub fn algorithm(&self) -> MstAlgorithm {
        self.options.algorithm
    }

    /// Sets the tie-break used by the Prim engines. Kruskal ignores it.
    ///
    /// # Examples
    /// ```
    /// use taproot_core::{TaprootBuilder, TieBreak};
    ///
    /// let builder = TaprootBuilder::new().with_tie_break(TieBreak::Minimum);
    /// assert_eq!(builder.tie_break(), TieBreak::Minimum);
    /// ```
    #[must_use]
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.options.tie_break = tie_break;
        self
    }

    /// Returns the configured tie-break.
    #[must_use]
    pub fn tie_break(&self) -> TieBreak {
        self.options.tie_break
    }

    /// Sets the edge ordering strategy used by Kruskal.
    ///
    /// # Examples
    /// ```
    /// use taproot_core::{EdgeSort, TaprootBuilder};
    ///
    /// let builder = TaprootBuilder::new().with_edge_sort(EdgeSort::Heapsort);
    /// assert_eq!(builder.edge_sort(), EdgeSort::Heapsort);
    /// ```
    #[must_use]
    pub fn with_edge_sort(mut self, edge_sort: EdgeSort) -> Self {
        self.options.edge_sort = edge_sort;
        self
    }

    /// Returns the configured edge ordering strategy.
    #[must_use]
    pub fn edge_sort(&self) -> EdgeSort {
        self.options.edge_sort
    }

    /// Sets the node the Prim engines grow from and the centroid search
    /// starts at.
    ///
    /// # Examples
    /// ```
    /// use taproot_core::TaprootBuilder;
    ///
    /// let builder = TaprootBuilder::new().with_start(3);
    /// assert_eq!(builder.start(), 3);
    /// ```
    #[must_use]
    pub fn with_start(mut self, start: usize) -> Self {
        self.options.start = start;
        self
    }

    /// Returns the configured start node.
    #[must_use]
    pub fn start(&self) -> usize {
        self.options.start
    }

    /// Validates the configuration and constructs a [`Taproot`] instance.
    ///
    /// The start node can only be checked against a source, so it is
    /// validated by [`Taproot::compress`].
    ///
    /// # Errors
    /// Returns [`TaprootError::PresortedEdgesUnsupported`] when Kruskal is
    /// paired with [`EdgeSort::Presorted`].
    ///
    /// # Examples
    /// ```
    /// use taproot_core::{EdgeSort, MstAlgorithm, TaprootBuilder, TaprootErrorCode};
    ///
    /// assert!(TaprootBuilder::new().build().is_ok());
    /// let err = TaprootBuilder::new()
    ///     .with_algorithm(MstAlgorithm::Kruskal)
    ///     .with_edge_sort(EdgeSort::Presorted)
    ///     .build()
    ///     .expect_err("similarity edges are unsorted");
    /// assert_eq!(err.code(), TaprootErrorCode::PresortedEdgesUnsupported);
    /// ```
    pub fn build(self) -> Result<Taproot> {
        if self.options.algorithm == MstAlgorithm::Kruskal
            && self.options.edge_sort == EdgeSort::Presorted
        {
            return Err(TaprootError::PresortedEdgesUnsupported);
        }
        Ok(Taproot::new(self.options))
    }
}
