//! ARA Search: generic best-first graph search with an anytime driver.
//!
//! Supports classic A* and Anytime Repairing A* (ARA*): an iterative search
//! that returns a bounded-suboptimal solution quickly and, given more time,
//! tightens the bound toward optimality. The best solution found is always
//! returned when the budget expires.
//!
//! # Crate dependency graph
//!
//! ```text
//! ara_search  ←  ara_harness  ←  lock-tests / benchmarks
//! (engine)       (worlds, runner)
//! ```
//!
//! # Key types
//!
//! - [`SearchGraph`]: graph adapter (outgoing edges plus a canonical node key)
//! - [`SearchPolicy`]: ε schedule, time budget, expansion cap
//! - [`search`] / [`astar`] / [`search_with_timeout`]: entry points
//! - [`SearchOutcome`]: best [`SearchResult`] plus a [`SearchReport`] audit
//!
//! All state for one call lives in a private per-call context; searches are
//! reentrant and independent calls may run in parallel.

#![forbid(unsafe_code)]

pub mod anytime;
pub mod budget;
mod context;
pub mod contract;
pub mod digest;
pub mod error;
pub mod frontier;
mod improve;
pub mod path;
pub mod policy;
pub mod record;
pub mod report;

pub use anytime::{astar, search, search_with_timeout, suboptimality_bound, SearchOutcome};
pub use contract::{Edge, SearchGraph};
pub use error::SearchError;
pub use path::SearchResult;
pub use policy::{SearchMode, SearchPolicy};
pub use report::{PassSummary, SearchReport, SearchStats, TerminationReason};
