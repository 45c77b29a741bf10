//! Search entry points and the anytime driver.
//!
//! The driver seeds the queue with the start record, runs ImprovePath, proves
//! a suboptimality bound for the best solution so far, and either stops or
//! shrinks ε and reschedules the carried-over records into a fresh queue.
//! It stops when the bound closes, the search space is exhausted, ε has
//! nothing left to repair, or the budget runs out. The best path found is
//! always returned.

use tracing::{debug, info};

use crate::budget::BudgetExhaustion;
use crate::context::SearchContext;
use crate::contract::SearchGraph;
use crate::error::SearchError;
use crate::improve::{evaluate_heuristic, improve_path, PassEnd};
use crate::path::{reconstruct_path, SearchResult};
use crate::policy::{timeout_from_secs, SearchMode, SearchPolicy};
use crate::report::{PassSummary, SearchReport, TerminationReason};

/// Result of a search call: the best path plus the full audit report.
#[derive(Debug, Clone)]
pub struct SearchOutcome<N> {
    pub result: SearchResult<N>,
    pub report: SearchReport,
}

impl<N> SearchOutcome<N> {
    #[must_use]
    pub fn into_result(self) -> SearchResult<N> {
        self.result
    }

    /// Last proven suboptimality ratio (`inf` when nothing was found).
    #[must_use]
    pub fn bound(&self) -> f64 {
        self.report.final_bound
    }
}

impl From<BudgetExhaustion> for TerminationReason {
    fn from(why: BudgetExhaustion) -> Self {
        match why {
            BudgetExhaustion::Timeout => Self::TimeoutExceeded,
            BudgetExhaustion::Expansions => Self::ExpansionBudgetExceeded,
        }
    }
}

/// `cost / lower_bound`, or 1 for a zero-cost solution. A positive cost over
/// a zero lower bound proves nothing and yields `inf`.
#[must_use]
pub fn suboptimality_bound(cost: f64, lower_bound: f64) -> f64 {
    if lower_bound > 0.0 {
        cost / lower_bound
    } else if cost <= 0.0 {
        1.0
    } else {
        f64::INFINITY
    }
}

/// Run a search under `policy`.
///
/// All soft terminations (no path, timeout, expansion cap) return `Ok` with
/// the best result found so far; see `report.termination`.
///
/// # Errors
///
/// - [`SearchError::InvalidPolicy`] if the policy fails validation.
/// - [`SearchError::Adapter`] with the adapter's or heuristic's own error.
/// - [`SearchError::InvalidEdgeCost`] / [`SearchError::InvalidHeuristic`] for
///   negative or non-finite values.
/// - [`SearchError::BrokenParentChain`] if path reconstruction fails.
pub fn search<G, P, H>(
    graph: &G,
    start: G::Node,
    is_goal: P,
    heuristic: H,
    policy: &SearchPolicy,
) -> Result<SearchOutcome<G::Node>, SearchError<G::Error>>
where
    G: SearchGraph,
    P: Fn(&G::Node) -> bool,
    H: Fn(&G::Node) -> Result<f64, G::Error>,
{
    policy.validate::<G::Error>()?;

    let mut ctx = SearchContext::new(policy);
    let start_key = graph.key_of(&start);
    let start_h = evaluate_heuristic(&heuristic, &start, &start_key)?;
    info!(
        event = "search_start",
        start = %start_key,
        mode = ?policy.mode,
        epsilon = ctx.epsilon,
        timeout_ms = u64::try_from(policy.timeout.as_millis()).unwrap_or(u64::MAX),
    );
    ctx.seed(start, start_key, start_h);

    let mut passes = Vec::new();
    let mut best = SearchResult::empty();
    let mut bound = f64::INFINITY;

    let termination = loop {
        let expansions_before = ctx.budget.expansions();
        let end = improve_path(&mut ctx, graph, &is_goal, &heuristic)?;

        if let Some(goal) = ctx.best_goal {
            let candidate = reconstruct_path::<_, G::Error>(&ctx.index, goal)?;
            if !best.is_solution() || candidate.cost < best.cost {
                best = candidate;
            }
        }
        if best.is_solution() {
            let proven = suboptimality_bound(best.cost, ctx.lower_bound(best.cost));
            bound = bound.min(proven);
        }

        let summary = PassSummary {
            pass: ctx.pass,
            epsilon: ctx.epsilon,
            solution_cost: best.is_solution().then_some(best.cost),
            bound,
            expansions: ctx.budget.expansions() - expansions_before,
            open_len: ctx.live_open().len(),
            inconsistent_len: ctx.inconsistent.len(),
        };
        debug!(
            event = "pass_end",
            pass = summary.pass,
            epsilon = summary.epsilon,
            cost = ?summary.solution_cost,
            bound = summary.bound,
            expansions = summary.expansions,
            open = summary.open_len,
            inconsistent = summary.inconsistent_len,
        );
        passes.push(summary);

        if let Some(reason) = stop_reason(&ctx, policy, end, &best, bound) {
            break reason;
        }

        let next = (ctx.epsilon - policy.epsilon_step).max(1.0);
        ctx.reschedule(next);
    };

    let stats = ctx.finish_stats();
    let report = SearchReport {
        passes,
        termination,
        final_epsilon: ctx.epsilon,
        final_bound: bound,
        stats,
        elapsed: ctx.budget.elapsed(),
    };
    info!(
        event = "search_end",
        termination = termination.as_str(),
        cost = best.cost,
        path_len = best.path.len(),
        bound = report.final_bound,
        passes = report.passes.len(),
        expansions = report.stats.expansions,
    );

    Ok(SearchOutcome {
        result: best,
        report,
    })
}

/// Decide whether the driver stops after a pass.
fn stop_reason<N>(
    ctx: &SearchContext<N>,
    policy: &SearchPolicy,
    end: PassEnd,
    best: &SearchResult<N>,
    bound: f64,
) -> Option<TerminationReason> {
    if !best.is_solution() {
        return Some(match end {
            PassEnd::Interrupted(why) => why.into(),
            PassEnd::GoalSettled | PassEnd::QueueExhausted => TerminationReason::NoPathFound,
        });
    }
    if end == PassEnd::QueueExhausted && ctx.inconsistent.is_empty() {
        return Some(TerminationReason::SearchSpaceExhausted);
    }
    if best.cost <= 0.0 || bound <= 1.0 + policy.bound_tolerance {
        return Some(TerminationReason::ProvenOptimal);
    }
    if let PassEnd::Interrupted(why) = end {
        return Some(why.into());
    }
    if let Some(why) = ctx.budget.exhausted() {
        return Some(why.into());
    }
    if policy.mode == SearchMode::AStar {
        return Some(TerminationReason::Converged);
    }
    if ctx.epsilon <= 1.0 && ctx.inconsistent.is_empty() {
        return Some(TerminationReason::Converged);
    }
    None
}

/// Anytime search with default settings and a timeout in seconds.
///
/// Negative or NaN timeouts are treated as zero. Returns only the path and
/// cost; use [`search`] for the report.
///
/// # Errors
///
/// Same as [`search`].
pub fn search_with_timeout<G, P, H>(
    graph: &G,
    start: G::Node,
    is_goal: P,
    heuristic: H,
    timeout_secs: f64,
) -> Result<SearchResult<G::Node>, SearchError<G::Error>>
where
    G: SearchGraph,
    P: Fn(&G::Node) -> bool,
    H: Fn(&G::Node) -> Result<f64, G::Error>,
{
    let policy = SearchPolicy {
        timeout: timeout_from_secs(timeout_secs),
        ..SearchPolicy::default()
    };
    search(graph, start, is_goal, heuristic, &policy).map(SearchOutcome::into_result)
}

/// Classic single-pass A*.
///
/// # Errors
///
/// Same as [`search`].
pub fn astar<G, P, H>(
    graph: &G,
    start: G::Node,
    is_goal: P,
    heuristic: H,
    timeout: std::time::Duration,
) -> Result<SearchOutcome<G::Node>, SearchError<G::Error>>
where
    G: SearchGraph,
    P: Fn(&G::Node) -> bool,
    H: Fn(&G::Node) -> Result<f64, G::Error>,
{
    search(graph, start, is_goal, heuristic, &SearchPolicy::astar(timeout))
}
