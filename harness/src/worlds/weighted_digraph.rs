//! `WeightedDigraph`: an explicit directed graph with named nodes.
//!
//! Nodes are plain strings and the canonical key is the name itself.
//! Adjacency and heuristic tables live in `BTreeMap`s, so edge order is the
//! insertion order per node and everything about a run is deterministic.
//!
//! Fault injection: nodes registered with [`WeightedDigraph::fail_expansion`]
//! or [`WeightedDigraph::fail_heuristic`] make the adapter return a
//! [`DigraphError`] instead of an answer.

use std::collections::{BTreeMap, BTreeSet};

use ara_search::{Edge, SearchGraph};

use crate::contract::SearchWorld;

/// Adapter faults raised by a [`WeightedDigraph`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DigraphError {
    #[error("edge enumeration failed at node {node}")]
    ExpansionFault { node: String },
    #[error("heuristic unavailable for node {node}")]
    HeuristicFault { node: String },
}

#[derive(Debug, Clone)]
pub struct WeightedDigraph {
    world_id: String,
    start: String,
    goals: BTreeSet<String>,
    adjacency: BTreeMap<String, Vec<(String, f64)>>,
    estimates: BTreeMap<String, f64>,
    expansion_faults: BTreeSet<String>,
    heuristic_faults: BTreeSet<String>,
}

impl WeightedDigraph {
    /// An empty graph containing only `start`. Unlisted nodes have no
    /// outgoing edges and a heuristic of 0.
    #[must_use]
    pub fn new(world_id: &str, start: &str) -> Self {
        Self {
            world_id: world_id.to_string(),
            start: start.to_string(),
            goals: BTreeSet::new(),
            adjacency: BTreeMap::new(),
            estimates: BTreeMap::new(),
            expansion_faults: BTreeSet::new(),
            heuristic_faults: BTreeSet::new(),
        }
    }

    /// Add a directed edge. Parallel edges are kept.
    #[must_use]
    pub fn edge(mut self, from: &str, to: &str, cost: f64) -> Self {
        self.adjacency
            .entry(from.to_string())
            .or_default()
            .push((to.to_string(), cost));
        self
    }

    #[must_use]
    pub fn goal(mut self, node: &str) -> Self {
        self.goals.insert(node.to_string());
        self
    }

    /// Set the heuristic estimate for `node`.
    #[must_use]
    pub fn estimate(mut self, node: &str, h: f64) -> Self {
        self.estimates.insert(node.to_string(), h);
        self
    }

    #[must_use]
    pub fn fail_expansion(mut self, node: &str) -> Self {
        self.expansion_faults.insert(node.to_string());
        self
    }

    #[must_use]
    pub fn fail_heuristic(mut self, node: &str) -> Self {
        self.heuristic_faults.insert(node.to_string());
        self
    }

    /// Every edge in the graph, grouped by source in key order.
    pub fn edges(&self) -> impl Iterator<Item = Edge<String>> + '_ {
        self.adjacency.iter().flat_map(|(from, out)| {
            out.iter()
                .map(move |(to, cost)| Edge::new(from.clone(), to.clone(), *cost))
        })
    }

    /// `S → A → B` with unit costs, goal `B`.
    #[must_use]
    pub fn chain() -> Self {
        Self::new("digraph_chain", "S")
            .edge("S", "A", 1.0)
            .edge("A", "B", 1.0)
            .goal("B")
    }

    /// `S → A → G` costs 1 + 5, `S → B → G` costs 3 + 1, goal `G`.
    /// Listing `A` first makes the cheap first hop the tempting one.
    #[must_use]
    pub fn diamond() -> Self {
        Self::new("digraph_diamond", "S")
            .edge("S", "A", 1.0)
            .edge("S", "B", 3.0)
            .edge("A", "G", 5.0)
            .edge("B", "G", 1.0)
            .goal("G")
    }

    /// The diamond with an admissible but uneven heuristic: `h(B) = 1`,
    /// everything else 0. Under a large ε the search commits to `S → A → G`
    /// first and repairs to `S → B → G` once ε shrinks.
    #[must_use]
    pub fn diamond_inflated() -> Self {
        let mut world = Self::diamond().estimate("B", 1.0);
        world.world_id = "digraph_diamond_inflated".to_string();
        world
    }

    /// The diamond with its goal cut off.
    #[must_use]
    pub fn disconnected() -> Self {
        Self::new("digraph_disconnected", "S")
            .edge("S", "A", 1.0)
            .edge("S", "B", 3.0)
            .edge("A", "B", 1.0)
            .goal("G")
    }
}

impl SearchGraph for WeightedDigraph {
    type Node = String;
    type Error = DigraphError;

    fn outgoing_edges(&self, node: &String) -> Result<Vec<Edge<String>>, DigraphError> {
        if self.expansion_faults.contains(node) {
            return Err(DigraphError::ExpansionFault { node: node.clone() });
        }
        Ok(self
            .adjacency
            .get(node)
            .map(|out| {
                out.iter()
                    .map(|(to, cost)| Edge::new(node.clone(), to.clone(), *cost))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn key_of(&self, node: &String) -> String {
        node.clone()
    }
}

impl SearchWorld for WeightedDigraph {
    fn world_id(&self) -> &str {
        &self.world_id
    }

    fn start(&self) -> String {
        self.start.clone()
    }

    fn is_goal(&self, node: &String) -> bool {
        self.goals.contains(node)
    }

    fn heuristic(&self, node: &String) -> Result<f64, DigraphError> {
        if self.heuristic_faults.contains(node) {
            return Err(DigraphError::HeuristicFault { node: node.clone() });
        }
        Ok(self.estimates.get(node).copied().unwrap_or(0.0))
    }
}
