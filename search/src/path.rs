//! Path reconstruction from parent links.

use crate::error::SearchError;
use crate::record::{RecordId, RecordIndex};

/// An ordered node path from the start to a goal, plus its total cost.
///
/// An empty path with cost 0 means no solution was found. A genuine
/// zero-cost solution always has at least one node.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<N> {
    pub path: Vec<N>,
    pub cost: f64,
}

impl<N> SearchResult<N> {
    /// The "no solution" result.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            path: Vec::new(),
            cost: 0.0,
        }
    }

    #[must_use]
    pub fn is_solution(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Walk parent links from `goal` back to the start record.
///
/// The cost is the sum of the recorded edge costs along the walked path,
/// accumulated start-first. It never exceeds the goal record's `g`, and
/// equals it once every ancestor's cost has settled.
///
/// # Errors
///
/// Returns [`SearchError::BrokenParentChain`] if the walk visits more
/// records than the index holds.
pub fn reconstruct_path<N: Clone, E>(
    index: &RecordIndex<N>,
    goal: RecordId,
) -> Result<SearchResult<N>, SearchError<E>> {
    let mut chain = Vec::new();
    let mut current = Some(goal);

    while let Some(id) = current {
        if chain.len() > index.len() {
            return Err(SearchError::BrokenParentChain {
                key: index.get(goal).key.clone(),
            });
        }
        chain.push(id);
        current = index.get(id).parent;
    }

    chain.reverse();
    let cost = chain
        .iter()
        .skip(1)
        .map(|&id| index.get(id).edge_cost)
        .fold(0.0, |acc, c| acc + c);
    let path = chain.iter().map(|&id| index.get(id).node.clone()).collect();

    Ok(SearchResult { path, cost })
}
