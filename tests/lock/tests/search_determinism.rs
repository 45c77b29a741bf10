//! In-process determinism: repeated runs of the same world and policy yield
//! byte-identical reports and identical bundle digests.

use std::thread;

use ara_harness::contract::SearchWorld;
use ara_harness::runner::{run_world, RunBundle};
use ara_harness::worlds::grid::GridWorld;
use ara_harness::worlds::weighted_digraph::WeightedDigraph;
use lock_tests::{digraph_worlds, generous_policy, grid_detour, stacks_reverse};

fn assert_stable<W: SearchWorld>(world: &W) -> RunBundle {
    let policy = generous_policy();
    let first = run_world(world, &policy).unwrap();
    first.verify().unwrap();
    for i in 1..10 {
        let again = run_world(world, &policy).unwrap();
        assert_eq!(
            first.report_json, again.report_json,
            "{}: report bytes differ on run {i}",
            world.world_id()
        );
        assert_eq!(first.path_keys, again.path_keys);
        assert_eq!(first.digest, again.digest);
    }
    first
}

#[test]
fn digraph_worlds_inproc_n10() {
    for world in digraph_worlds() {
        assert_stable(&world);
    }
}

#[test]
fn grid_worlds_inproc_n10() {
    assert_stable(&grid_detour());
    assert_stable(&GridWorld::serpentine(24, 12, 4));
}

#[test]
fn stacks_world_inproc_n10() {
    assert_stable(&stacks_reverse());
}

#[test]
fn parallel_searches_do_not_interfere() {
    let baseline = run_world(&grid_detour(), &generous_policy()).unwrap();
    let digests: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| run_world(&grid_detour(), &generous_policy()).unwrap().digest))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(digests.iter().all(|d| *d == baseline.digest));
}

#[test]
fn distinct_worlds_have_distinct_digests() {
    let bundles: Vec<RunBundle> = digraph_worlds()
        .iter()
        .map(|w| run_world(w, &generous_policy()).unwrap())
        .collect();
    for (i, a) in bundles.iter().enumerate() {
        for b in &bundles[i + 1..] {
            assert_ne!(a.digest, b.digest, "{} vs {}", a.world_id, b.world_id);
        }
    }
}

#[test]
fn report_json_round_trips_to_same_bytes() {
    let bundle = run_world(&WeightedDigraph::diamond_inflated(), &generous_policy()).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bundle.report_json).unwrap();
    assert_eq!(serde_json::to_vec(&value).unwrap(), bundle.report_json);
    assert_eq!(value["termination"], "proven_optimal");
    assert_eq!(value["passes"][0]["solution_cost"], "6");
    assert_eq!(value["passes"][1]["solution_cost"], "4");
}
