//! ARA Harness: reference worlds and a reproducible runner for `ara_search`.
//!
//! A world bundles a graph adapter with its start node, goal test and
//! heuristic. The runner drives a world through the search engine and
//! packages the result as a digest-addressed [`runner::RunBundle`], so two
//! runs can be compared byte for byte.
//!
//! The harness does NOT implement search logic; it delegates to the engine.

#![forbid(unsafe_code)]

pub mod contract;
pub mod oracle;
pub mod runner;
pub mod worlds;
