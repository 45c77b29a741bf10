//! Graph adapter contract.

use std::fmt::Debug;

/// A weighted directed edge produced by [`SearchGraph::outgoing_edges`].
///
/// Costs must be finite and non-negative. The engine rejects anything else
/// with [`crate::error::SearchError::InvalidEdgeCost`].
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<N> {
    pub from: N,
    pub to: N,
    pub cost: f64,
}

impl<N> Edge<N> {
    #[must_use]
    pub fn new(from: N, to: N, cost: f64) -> Self {
        Self { from, to, cost }
    }
}

/// Trait for graphs that support search.
///
/// Nodes are opaque to the engine. Identity during search is driven entirely
/// by [`SearchGraph::key_of`]: two nodes are the same logical state iff their
/// keys are equal.
///
/// # Contract
///
/// - `key_of` must be pure and injective with respect to logical state.
/// - `outgoing_edges` must be deterministic: same node, same edges in the same
///   order. Edge order is the tie-break order for equal priorities.
/// - Errors returned by `outgoing_edges` are handed back to the caller
///   unmodified; the engine never retries.
pub trait SearchGraph {
    /// The caller-defined state type.
    type Node: Clone + Debug;
    /// Fault type raised by the adapter or the heuristic.
    type Error: std::error::Error + 'static;

    /// Enumerate every edge leaving `node`.
    ///
    /// # Errors
    ///
    /// Returns the adapter's own error type if the domain model cannot
    /// enumerate successors.
    fn outgoing_edges(&self, node: &Self::Node) -> Result<Vec<Edge<Self::Node>>, Self::Error>;

    /// Canonical key of `node`.
    fn key_of(&self, node: &Self::Node) -> String;

    /// Documentation-level node equality. Defaults to key equality.
    fn same_node(&self, a: &Self::Node, b: &Self::Node) -> bool {
        self.key_of(a) == self.key_of(b)
    }
}
