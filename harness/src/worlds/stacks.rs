//! `StacksWorld`: the blocks-world stacking puzzle.
//!
//! A state is a fixed number of stacks of lettered blocks. One move lifts
//! the top block of a stack onto another stack (possibly an empty one) and
//! costs 1. States are written bottom to top with stacks separated by `|`,
//! e.g. `"ab|c|"` is three stacks: `a` under `b`, `c`, and an empty one.
//!
//! Heuristic: the number of blocks not resting on their goal foundation. A
//! block is in place when its stack index matches the goal and every block
//! below it is in place too. Each misplaced block must move at least once,
//! so the estimate is admissible.

use std::collections::BTreeMap;
use std::convert::Infallible;

use ara_search::{Edge, SearchGraph};

use crate::contract::SearchWorld;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Stacks(Vec<Vec<char>>);

impl Stacks {
    /// Parse `"ab|c|"` notation.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self(text.split('|').map(|s| s.chars().collect()).collect())
    }

    #[must_use]
    pub fn stack_count(&self) -> usize {
        self.0.len()
    }

    /// Move the top block of `from` onto `to`. `None` if `from` is empty or
    /// either index is out of range.
    #[must_use]
    pub fn moved(&self, from: usize, to: usize) -> Option<Self> {
        if from == to || to >= self.0.len() {
            return None;
        }
        let mut next = self.clone();
        let block = next.0.get_mut(from)?.pop()?;
        next.0[to].push(block);
        Some(next)
    }

    fn block_counts(&self) -> BTreeMap<char, usize> {
        let mut counts = BTreeMap::new();
        for &block in self.0.iter().flatten() {
            *counts.entry(block).or_insert(0) += 1;
        }
        counts
    }
}

impl std::fmt::Display for Stacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, stack) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            for block in stack {
                write!(f, "{block}")?;
            }
        }
        Ok(())
    }
}

/// Start and goal layouts disagree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StacksError {
    #[error("start has {start} stacks but goal has {goal}")]
    StackCount { start: usize, goal: usize },
    #[error("start and goal hold different blocks")]
    BlockMismatch,
}

#[derive(Debug, Clone)]
pub struct StacksWorld {
    world_id: String,
    start: Stacks,
    goal: Stacks,
}

impl StacksWorld {
    /// # Errors
    ///
    /// Returns [`StacksError`] if `start` and `goal` differ in stack count or
    /// in the multiset of blocks.
    pub fn new(world_id: &str, start: &str, goal: &str) -> Result<Self, StacksError> {
        let start = Stacks::parse(start);
        let goal = Stacks::parse(goal);
        if start.stack_count() != goal.stack_count() {
            return Err(StacksError::StackCount {
                start: start.stack_count(),
                goal: goal.stack_count(),
            });
        }
        if start.block_counts() != goal.block_counts() {
            return Err(StacksError::BlockMismatch);
        }
        Ok(Self {
            world_id: world_id.to_string(),
            start,
            goal,
        })
    }

    /// Number of blocks not resting on their goal foundation.
    #[must_use]
    pub fn misplaced(&self, state: &Stacks) -> usize {
        state
            .0
            .iter()
            .zip(&self.goal.0)
            .map(|(have, want)| {
                let settled = have.iter().zip(want).take_while(|(a, b)| a == b).count();
                have.len() - settled
            })
            .sum()
    }
}

impl SearchGraph for StacksWorld {
    type Node = Stacks;
    type Error = Infallible;

    fn outgoing_edges(&self, node: &Stacks) -> Result<Vec<Edge<Stacks>>, Infallible> {
        let n = node.stack_count();
        let mut out = Vec::new();
        for from in 0..n {
            for to in 0..n {
                if let Some(next) = node.moved(from, to) {
                    out.push(Edge::new(node.clone(), next, 1.0));
                }
            }
        }
        Ok(out)
    }

    fn key_of(&self, node: &Stacks) -> String {
        node.to_string()
    }
}

impl SearchWorld for StacksWorld {
    fn world_id(&self) -> &str {
        &self.world_id
    }

    fn start(&self) -> Stacks {
        self.start.clone()
    }

    fn is_goal(&self, node: &Stacks) -> bool {
        *node == self.goal
    }

    #[allow(clippy::cast_precision_loss)]
    fn heuristic(&self, node: &Stacks) -> Result<f64, Infallible> {
        Ok(self.misplaced(node) as f64)
    }
}
