//! Property tests: the anytime search converges to the Dijkstra optimum,
//! every pass reports a valid bound, and costs and bounds never get worse.

use ara_harness::contract::{search_world, SearchWorld};
use ara_harness::oracle::dijkstra_cost;
use ara_harness::worlds::grid::GridWorld;
use ara_harness::worlds::weighted_digraph::WeightedDigraph;
use ara_search::{SearchOutcome, SearchPolicy};
use lock_tests::{check_path, digraph_from_edges, generous_policy};
use proptest::prelude::*;

const TOL: f64 = 1e-9;

/// Exact cost-to-go per node, scaled by `scale`. Nodes that cannot reach
/// the goal get 0.
fn with_scaled_exact_heuristic(world: WeightedDigraph, node_count: usize, scale: f64) -> WeightedDigraph {
    let mut estimated = world.clone();
    for i in 0..node_count {
        let node = format!("n{i}");
        let to_go = dijkstra_cost(&world, node.clone(), |n| world.is_goal(n))
            .expect("digraph adapter is infallible without faults")
            .unwrap_or(0.0);
        estimated = estimated.estimate(&node, to_go * scale);
    }
    estimated
}

fn ascii_grid(width: usize, height: usize, cells: &[u8]) -> String {
    let mut map = String::new();
    for row in 0..height {
        for col in 0..width {
            let symbol = if (row, col) == (0, 0) {
                'S'
            } else if (row, col) == (height - 1, width - 1) {
                'G'
            } else {
                match cells[(row * width + col) % cells.len()] {
                    0..=2 => '#',
                    3..=7 => '.',
                    c => char::from(b'0' + (c - 6)),
                }
            };
            map.push(symbol);
        }
        map.push('\n');
    }
    map
}

/// Invariants every finished run must satisfy against a known optimum.
fn assert_anytime_invariants<W: SearchWorld>(world: &W, outcome: &SearchOutcome<W::Node>, optimum: Option<f64>) {
    let report = &outcome.report;
    assert!(
        !report.termination.is_budget_stop(),
        "generous budget should never run out: {:?}",
        report.termination
    );

    let Some(optimum) = optimum else {
        assert!(!outcome.result.is_solution());
        return;
    };

    assert!(
        (outcome.result.cost - optimum).abs() < TOL,
        "final cost {} != optimum {optimum}",
        outcome.result.cost
    );
    check_path(world, &outcome.result.path, outcome.result.cost).unwrap();

    let mut last_cost = f64::INFINITY;
    let mut last_bound = f64::INFINITY;
    for pass in &report.passes {
        assert!(pass.bound <= last_bound, "bound went up: {:?}", report.passes);
        last_bound = pass.bound;
        let Some(cost) = pass.solution_cost else {
            continue;
        };
        assert!(cost <= last_cost, "cost went up: {:?}", report.passes);
        last_cost = cost;
        assert!(pass.bound >= 1.0);
        if pass.bound.is_infinite() {
            continue;
        }
        assert!(
            cost <= pass.bound * optimum + TOL,
            "pass {} cost {cost} exceeds bound {} x optimum {optimum}",
            pass.pass,
            pass.bound
        );
    }
}

fn digraph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize, u8)>)> {
    (2_usize..10).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n, 0_u8..10), 0..30)))
}

fn grid_strategy() -> impl Strategy<Value = (usize, usize, Vec<u8>)> {
    (2_usize..9, 2_usize..9, prop::collection::vec(0_u8..16, 1..81))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_digraphs_converge_to_optimum(
        (n, edges) in digraph_strategy(),
        quarter in 0_u8..=4,
        epsilon in prop::sample::select(vec![1.0, 1.5, 3.0, 5.0]),
    ) {
        let base = digraph_from_edges(n, &edges);
        let world = with_scaled_exact_heuristic(base, n, f64::from(quarter) / 4.0);
        let optimum = dijkstra_cost(&world, world.start(), |node| world.is_goal(node)).unwrap();

        let policy = SearchPolicy { epsilon_initial: epsilon, ..generous_policy() };
        let outcome = search_world(&world, &policy).unwrap();
        assert_anytime_invariants(&world, &outcome, optimum);
    }

    #[test]
    fn random_digraphs_astar_is_optimal((n, edges) in digraph_strategy()) {
        let world = digraph_from_edges(n, &edges);
        let optimum = dijkstra_cost(&world, world.start(), |node| world.is_goal(node)).unwrap();
        let outcome = search_world(&world, &SearchPolicy::astar(std::time::Duration::from_secs(60))).unwrap();
        assert_anytime_invariants(&world, &outcome, optimum);
        prop_assert_eq!(outcome.report.passes.len(), 1);
    }

    #[test]
    fn random_grids_respect_epsilon_per_pass((width, height, cells) in grid_strategy()) {
        let world = GridWorld::parse("grid_random", &ascii_grid(width, height, &cells)).unwrap();
        let optimum = dijkstra_cost(&world, world.start(), |node| world.is_goal(node)).unwrap();
        let outcome = search_world(&world, &generous_policy()).unwrap();
        assert_anytime_invariants(&world, &outcome, optimum);

        // Manhattan distance is consistent here, so every pass is
        // ε-suboptimal.
        if let Some(optimum) = optimum {
            for pass in &outcome.report.passes {
                if let Some(cost) = pass.solution_cost {
                    prop_assert!(cost <= pass.epsilon * optimum + TOL);
                }
            }
        }
    }
}

#[test]
fn serpentine_grid_improves_across_passes() {
    let world = GridWorld::serpentine(40, 16, 5);
    let optimum = dijkstra_cost(&world, world.start(), |n| world.is_goal(n)).unwrap();
    let outcome = search_world(&world, &generous_policy()).unwrap();
    assert_anytime_invariants(&world, &outcome, optimum);
    assert!(outcome.report.passes.len() >= 2);
}

#[test]
fn overestimating_heuristic_still_reports_honest_bound() {
    let world = lock_tests::grid_detour().with_heuristic_weight(4.0);
    let optimum = dijkstra_cost(&world, world.start(), |n| world.is_goal(n)).unwrap();
    let outcome = search_world(&world, &generous_policy()).unwrap();
    let first = &outcome.report.passes[0];
    let cost = first.solution_cost.expect("first pass finds a path");
    assert!(cost >= optimum.unwrap() - TOL);
    assert!(outcome.result.cost <= cost);
}
