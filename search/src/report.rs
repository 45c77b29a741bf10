//! Search report: per-pass history and termination audit.
//!
//! The normative surface is the ordered list of [`PassSummary`] entries plus
//! the termination reason. Wall-clock time is carried for logging but kept
//! out of the canonical JSON, so two runs that made the same decisions
//! produce the same digest.

use std::time::Duration;

use crate::digest::{canonical_hash, canonical_json_bytes, float_json, ContentHash, DOMAIN_SEARCH_REPORT};

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The returned cost is within `bound_tolerance` of the proven lower bound.
    ProvenOptimal,
    /// The queue emptied with nothing left to repair.
    SearchSpaceExhausted,
    /// The queue emptied and no goal was ever closed.
    NoPathFound,
    /// The wall-clock budget ran out first.
    TimeoutExceeded,
    /// The expansion cap ran out first.
    ExpansionBudgetExceeded,
    /// ε is at its floor and no inconsistent records remain, but the bound
    /// could not be closed (inadmissible heuristic).
    Converged,
}

impl TerminationReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProvenOptimal => "proven_optimal",
            Self::SearchSpaceExhausted => "search_space_exhausted",
            Self::NoPathFound => "no_path_found",
            Self::TimeoutExceeded => "timeout_exceeded",
            Self::ExpansionBudgetExceeded => "expansion_budget_exceeded",
            Self::Converged => "converged",
        }
    }

    /// True for the soft budget stops.
    #[must_use]
    pub fn is_budget_stop(self) -> bool {
        matches!(self, Self::TimeoutExceeded | Self::ExpansionBudgetExceeded)
    }
}

/// Outcome of one ImprovePath pass, recorded after the bound is computed.
#[derive(Debug, Clone, PartialEq)]
pub struct PassSummary {
    /// Zero-based pass number.
    pub pass: u32,
    /// Inflation factor used for the pass.
    pub epsilon: f64,
    /// Best solution cost known after the pass.
    pub solution_cost: Option<f64>,
    /// Proven suboptimality ratio after the pass (`inf` when unsolved).
    pub bound: f64,
    /// Expansions performed during this pass.
    pub expansions: u64,
    /// Live open records when the pass ended.
    pub open_len: usize,
    /// Inconsistent records when the pass ended.
    pub inconsistent_len: usize,
}

/// Aggregate counters over the whole call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expansions: u64,
    pub generated: u64,
    /// Strict `g` improvements on already-known records.
    pub improved: u64,
    /// Closed records moved back to open.
    pub reopened: u64,
    pub inconsistent_transitions: u64,
    /// Superseded queue entries discarded on pop.
    pub stale_skipped: u64,
    pub records: u64,
    pub queue_high_water: u64,
}

/// Complete audit of one search call.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub passes: Vec<PassSummary>,
    pub termination: TerminationReason,
    pub final_epsilon: f64,
    pub final_bound: f64,
    pub stats: SearchStats,
    /// Wall-clock duration of the call. Not part of the canonical form.
    pub elapsed: Duration,
}

impl SearchReport {
    /// Per-pass solution costs, skipping passes that found nothing.
    pub fn cost_history(&self) -> impl Iterator<Item = f64> + '_ {
        self.passes.iter().filter_map(|p| p.solution_cost)
    }

    /// Per-pass suboptimality bounds.
    pub fn bound_history(&self) -> impl Iterator<Item = f64> + '_ {
        self.passes.iter().map(|p| p.bound)
    }

    /// Serialize the report to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content digest of the canonical JSON form.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, serde_json::Error> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(DOMAIN_SEARCH_REPORT, &bytes))
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "final_bound": float_json(self.final_bound),
            "final_epsilon": float_json(self.final_epsilon),
            "passes": self.passes.iter().map(pass_to_json).collect::<Vec<_>>(),
            "stats": stats_to_json(&self.stats),
            "termination": self.termination.as_str(),
        })
    }
}

fn pass_to_json(p: &PassSummary) -> serde_json::Value {
    serde_json::json!({
        "bound": float_json(p.bound),
        "epsilon": float_json(p.epsilon),
        "expansions": p.expansions,
        "inconsistent_len": p.inconsistent_len,
        "open_len": p.open_len,
        "pass": p.pass,
        "solution_cost": p.solution_cost.map(float_json),
    })
}

fn stats_to_json(s: &SearchStats) -> serde_json::Value {
    serde_json::json!({
        "expansions": s.expansions,
        "generated": s.generated,
        "improved": s.improved,
        "inconsistent_transitions": s.inconsistent_transitions,
        "queue_high_water": s.queue_high_water,
        "records": s.records,
        "reopened": s.reopened,
        "stale_skipped": s.stale_skipped,
    })
}
