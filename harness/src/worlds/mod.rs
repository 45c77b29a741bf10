//! Reference worlds.

pub mod grid;
pub mod stacks;
pub mod weighted_digraph;
