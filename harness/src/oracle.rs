//! Reference optimum via plain Dijkstra.
//!
//! Independent of the engine's queue and record index, so tests can check
//! the anytime search against a second implementation.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use ara_search::SearchGraph;

struct Frontier<N> {
    cost: f64,
    seq: u64,
    node: N,
}

impl<N> PartialEq for Frontier<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N> Eq for Frontier<N> {}

impl<N> PartialOrd for Frontier<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N> Ord for Frontier<N> {
    // Reversed: BinaryHeap pops the cheapest entry.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then(other.seq.cmp(&self.seq))
    }
}

/// Cheapest cost from `start` to any node satisfying `is_goal`, or `None`
/// if no goal is reachable. Edge costs are taken as given.
///
/// # Errors
///
/// Propagates the first adapter error.
pub fn dijkstra_cost<G, P>(graph: &G, start: G::Node, is_goal: P) -> Result<Option<f64>, G::Error>
where
    G: SearchGraph,
    P: Fn(&G::Node) -> bool,
{
    let mut best: HashMap<String, f64> = HashMap::new();
    let mut heap = BinaryHeap::new();
    let mut seq = 0_u64;

    best.insert(graph.key_of(&start), 0.0);
    heap.push(Frontier {
        cost: 0.0,
        seq,
        node: start,
    });

    while let Some(Frontier { cost, node, .. }) = heap.pop() {
        let key = graph.key_of(&node);
        if best.get(&key).is_some_and(|&known| cost > known) {
            continue;
        }
        if is_goal(&node) {
            return Ok(Some(cost));
        }
        for edge in graph.outgoing_edges(&node)? {
            let next = cost + edge.cost;
            let to_key = graph.key_of(&edge.to);
            let improves = match best.get(&to_key) {
                Some(&known) => next < known,
                None => true,
            };
            if improves {
                best.insert(to_key, next);
                seq += 1;
                heap.push(Frontier {
                    cost: next,
                    seq,
                    node: edge.to,
                });
            }
        }
    }
    Ok(None)
}
