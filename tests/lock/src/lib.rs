//! Shared fixtures for the lock tests and the `search_fixture` binary.

use std::time::Duration;

use ara_harness::contract::SearchWorld;
use ara_harness::worlds::grid::GridWorld;
use ara_harness::worlds::stacks::StacksWorld;
use ara_harness::worlds::weighted_digraph::WeightedDigraph;
use ara_search::SearchPolicy;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a stderr subscriber driven by `RUST_LOG` (default `warn`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}

/// Default anytime policy with a budget no test run will hit.
#[must_use]
pub fn generous_policy() -> SearchPolicy {
    SearchPolicy {
        timeout: Duration::from_secs(60),
        ..SearchPolicy::default()
    }
}

/// A 3-by-3 stacking puzzle that needs a handful of moves.
///
/// # Panics
///
/// Never: the layouts are fixed and consistent.
#[must_use]
pub fn stacks_reverse() -> StacksWorld {
    StacksWorld::new("stacks_reverse", "cba||", "abc||").expect("layouts agree")
}

/// A grid whose straight-line route crosses expensive cells.
///
/// # Panics
///
/// Never: the map is fixed and well formed.
#[must_use]
pub fn grid_detour() -> GridWorld {
    GridWorld::parse(
        "grid_detour",
        "
        S....#....
        .###.#.##.
        .#9..9..#.
        .#.####.#.
        ...#..9...
        ##.#.##.#.
        ...9.....G
        ",
    )
    .expect("map parses")
}

/// Every world the determinism checks run, in a fixed order.
#[must_use]
pub fn digraph_worlds() -> Vec<WeightedDigraph> {
    vec![
        WeightedDigraph::chain(),
        WeightedDigraph::diamond(),
        WeightedDigraph::diamond_inflated(),
        WeightedDigraph::disconnected(),
    ]
}

/// Build a digraph over nodes `n0..n{node_count}` from `(from, to, cost)`
/// triples. Start is `n0`, goal is the last node.
#[must_use]
pub fn digraph_from_edges(node_count: usize, edges: &[(usize, usize, u8)]) -> WeightedDigraph {
    let goal = format!("n{}", node_count.saturating_sub(1));
    let mut world = WeightedDigraph::new("digraph_random", "n0").goal(&goal);
    for &(from, to, cost) in edges {
        world = world.edge(
            &format!("n{}", from % node_count),
            &format!("n{}", to % node_count),
            f64::from(cost),
        );
    }
    world
}

/// Check that consecutive path nodes are joined by edges and that `cost` is
/// the sum of the cheapest such edges. Returns a description of the first
/// problem found.
///
/// # Errors
///
/// Returns a message naming the broken hop or the cost mismatch.
pub fn check_path<W: SearchWorld>(world: &W, path: &[W::Node], cost: f64) -> Result<(), String> {
    let Some(first) = path.first() else {
        return if cost.abs() < f64::EPSILON {
            Ok(())
        } else {
            Err(format!("empty path with cost {cost}"))
        };
    };
    if world.key_of(first) != world.key_of(&world.start()) {
        return Err(format!("path starts at {}", world.key_of(first)));
    }
    let last = &path[path.len() - 1];
    if !world.is_goal(last) {
        return Err(format!("path ends at non-goal {}", world.key_of(last)));
    }

    let mut total = 0.0;
    for hop in path.windows(2) {
        let to_key = world.key_of(&hop[1]);
        let edges = world
            .outgoing_edges(&hop[0])
            .map_err(|e| format!("adapter error: {e}"))?;
        let cheapest = edges
            .iter()
            .filter(|e| world.key_of(&e.to) == to_key)
            .map(|e| e.cost)
            .fold(f64::INFINITY, f64::min);
        if cheapest.is_infinite() {
            return Err(format!("no edge {} -> {to_key}", world.key_of(&hop[0])));
        }
        total += cheapest;
    }
    if (total - cost).abs() > 1e-9 {
        return Err(format!("edge sum {total} != reported cost {cost}"));
    }
    Ok(())
}
