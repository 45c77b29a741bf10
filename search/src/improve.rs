//! ImprovePath: one weighted-A* pass over the current queue.
//!
//! Record transitions inside a pass:
//!
//! ```text
//! Open --expand--> Closed{pass} --cheaper path, same pass--> Inconsistent
//!                       \--cheaper path, later pass (or A* mode)--> Open
//! ```
//!
//! Inconsistent records are never expanded here; the driver re-seeds them
//! into the next pass's queue.

use tracing::trace;

use crate::budget::BudgetExhaustion;
use crate::context::SearchContext;
use crate::contract::SearchGraph;
use crate::error::SearchError;
use crate::record::{RecordId, RecordStatus, SearchRecord};

/// How a pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PassEnd {
    /// The best known goal is no worse than anything left in the queue
    /// (including the case where it was just closed).
    GoalSettled,
    /// The queue has no live entries left.
    QueueExhausted,
    /// The budget ran out before the pass finished.
    Interrupted(BudgetExhaustion),
}

/// Evaluate the heuristic and reject values the search cannot order by.
pub(crate) fn evaluate_heuristic<N, E, H>(
    heuristic: &H,
    node: &N,
    key: &str,
) -> Result<f64, SearchError<E>>
where
    H: Fn(&N) -> Result<f64, E>,
{
    let value = heuristic(node).map_err(SearchError::Adapter)?;
    if !value.is_finite() || value < 0.0 {
        return Err(SearchError::InvalidHeuristic {
            key: key.to_string(),
            value,
        });
    }
    Ok(value)
}

/// Run one pass.
///
/// Each loop iteration first applies the ARA* stopping rule (the best goal's
/// `f` does not exceed the smallest live `f`), then polls the budget, then
/// expands exactly one record. A goal is recognised when it is popped, and
/// the pass returns immediately.
pub(crate) fn improve_path<G, P, H>(
    ctx: &mut SearchContext<G::Node>,
    graph: &G,
    is_goal: &P,
    heuristic: &H,
) -> Result<PassEnd, SearchError<G::Error>>
where
    G: SearchGraph,
    P: Fn(&G::Node) -> bool,
    H: Fn(&G::Node) -> Result<f64, G::Error>,
{
    loop {
        let Some(min_f) = ctx.peek_live_f() else {
            return Ok(PassEnd::QueueExhausted);
        };
        if let Some(goal) = ctx.best_goal {
            if ctx.index.get(goal).f(ctx.epsilon) <= min_f {
                return Ok(PassEnd::GoalSettled);
            }
        }
        if let Some(why) = ctx.budget.exhausted() {
            return Ok(PassEnd::Interrupted(why));
        }

        let Some(current) = ctx.pop_live() else {
            return Ok(PassEnd::QueueExhausted);
        };
        ctx.index.get_mut(current).status = RecordStatus::Closed { pass: ctx.pass };
        ctx.budget.record_expansion();

        if is_goal(&ctx.index.get(current).node) {
            if ctx.offer_goal(current) {
                trace!(
                    event = "goal_closed",
                    key = %ctx.index.get(current).key,
                    g = ctx.index.get(current).g,
                );
            }
            return Ok(PassEnd::GoalSettled);
        }

        expand(ctx, graph, heuristic, current)?;
    }
}

/// Relax every outgoing edge of `current`.
fn expand<G, H>(
    ctx: &mut SearchContext<G::Node>,
    graph: &G,
    heuristic: &H,
    current: RecordId,
) -> Result<(), SearchError<G::Error>>
where
    G: SearchGraph,
    H: Fn(&G::Node) -> Result<f64, G::Error>,
{
    let (edges, g) = {
        let record = ctx.index.get(current);
        let edges = graph
            .outgoing_edges(&record.node)
            .map_err(SearchError::Adapter)?;
        (edges, record.g)
    };

    for edge in edges {
        if !edge.cost.is_finite() || edge.cost < 0.0 {
            return Err(SearchError::InvalidEdgeCost {
                from_key: ctx.index.get(current).key.clone(),
                to_key: graph.key_of(&edge.to),
                cost: edge.cost,
            });
        }
        ctx.stats.generated += 1;

        let accum = g + edge.cost;
        let key = graph.key_of(&edge.to);

        let Some(target) = ctx.index.lookup(&key) else {
            let h = evaluate_heuristic(heuristic, &edge.to, &key)?;
            let id = ctx.index.insert(SearchRecord {
                node: edge.to,
                key,
                parent: Some(current),
                edge_cost: edge.cost,
                g: accum,
                h,
                status: RecordStatus::Open,
            });
            ctx.push_open(id);
            continue;
        };

        if !ctx.index.improve(target, current, edge.cost, accum) {
            continue;
        }
        ctx.stats.improved += 1;

        match ctx.index.get(target).status {
            RecordStatus::Open => ctx.push_open(target),
            RecordStatus::Closed { pass } if pass < ctx.pass || ctx.reopen_closed => {
                ctx.index.get_mut(target).status = RecordStatus::Open;
                ctx.stats.reopened += 1;
                ctx.push_open(target);
            }
            RecordStatus::Closed { .. } => {
                ctx.index.get_mut(target).status = RecordStatus::Inconsistent;
                ctx.inconsistent.push(target);
                ctx.stats.inconsistent_transitions += 1;
                trace!(event = "inconsistent", key = %key, g = accum);
            }
            RecordStatus::Inconsistent => {}
        }
    }

    Ok(())
}
