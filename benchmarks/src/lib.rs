//! Shared helpers for the ARA benchmark suites.

use std::time::Duration;

use ara_harness::worlds::grid::GridWorld;
use ara_harness::worlds::stacks::StacksWorld;
use ara_search::{SearchMode, SearchPolicy};

/// Budget large enough that no benchmark run is cut short.
pub const BENCH_TIMEOUT: Duration = Duration::from_secs(600);

/// Grid sizes for the scaling regimes: `(width, height, wall spacing)`.
pub const GRID_REGIMES: &[(usize, usize, usize)] = &[(32, 16, 4), (64, 32, 6), (128, 64, 8)];

/// Anytime policy starting at `epsilon`.
#[must_use]
pub fn anytime_policy(epsilon: f64) -> SearchPolicy {
    SearchPolicy::anytime(epsilon, BENCH_TIMEOUT)
}

/// First pass at `epsilon`, then straight down to ε = 1.
#[must_use]
pub fn two_pass_policy(epsilon: f64) -> SearchPolicy {
    SearchPolicy {
        epsilon_step: f64::MAX,
        ..anytime_policy(epsilon)
    }
}

/// Plain A* under the benchmark budget.
#[must_use]
pub fn astar_policy() -> SearchPolicy {
    SearchPolicy {
        mode: SearchMode::AStar,
        ..anytime_policy(1.0)
    }
}

#[must_use]
pub fn grid_regime(width: usize, height: usize, spacing: usize) -> GridWorld {
    GridWorld::serpentine(width, height, spacing)
}

/// Four-stack reversal of five blocks.
///
/// # Panics
///
/// Never: the layouts are fixed and consistent.
#[must_use]
pub fn stacks_regime() -> StacksWorld {
    StacksWorld::new("stacks_bench", "edcba|||", "abcde|||").expect("layouts agree")
}
