//! World contract: everything the runner needs to search a world.

use ara_search::{search, SearchError, SearchGraph, SearchOutcome, SearchPolicy};

/// A searchable world.
///
/// The graph side (edges, canonical keys) comes from [`SearchGraph`]. A world
/// adds the problem instance on top: where to start, what counts as a goal,
/// and an admissible cost-to-go estimate.
pub trait SearchWorld: SearchGraph {
    /// Unique world identifier (e.g., `"digraph_diamond"`).
    fn world_id(&self) -> &str;

    /// The node the search starts from.
    fn start(&self) -> Self::Node;

    fn is_goal(&self, node: &Self::Node) -> bool;

    /// Non-negative estimate of the remaining cost from `node` to the
    /// nearest goal.
    ///
    /// # Errors
    ///
    /// Returns the world's own error if the estimate cannot be computed.
    fn heuristic(&self, node: &Self::Node) -> Result<f64, Self::Error>;
}

/// Search `world` from its start node under `policy`.
///
/// # Errors
///
/// Propagates any [`SearchError`] from the engine.
pub fn search_world<W: SearchWorld>(
    world: &W,
    policy: &SearchPolicy,
) -> Result<SearchOutcome<W::Node>, SearchError<W::Error>> {
    search(
        world,
        world.start(),
        |node| world.is_goal(node),
        |node| world.heuristic(node),
        policy,
    )
}
