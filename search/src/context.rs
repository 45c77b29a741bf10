//! Per-call search state.
//!
//! Everything a search mutates lives in one [`SearchContext`] owned by a
//! single call. Independent searches share nothing and may run on separate
//! threads.

use tracing::debug;

use crate::budget::SearchBudget;
use crate::frontier::{OpenQueue, QueueEntry};
use crate::policy::{SearchMode, SearchPolicy};
use crate::record::{RecordId, RecordIndex, RecordStatus, SearchRecord};
use crate::report::SearchStats;

pub(crate) struct SearchContext<N> {
    pub(crate) index: RecordIndex<N>,
    pub(crate) queue: OpenQueue,
    pub(crate) inconsistent: Vec<RecordId>,
    pub(crate) epsilon: f64,
    pub(crate) pass: u32,
    /// A* mode: a closed record improved in the active pass goes back to open
    /// instead of waiting in the inconsistent set.
    pub(crate) reopen_closed: bool,
    pub(crate) best_goal: Option<RecordId>,
    pub(crate) budget: SearchBudget,
    pub(crate) stats: SearchStats,
}

impl<N> SearchContext<N> {
    #[must_use]
    pub(crate) fn new(policy: &SearchPolicy) -> Self {
        Self {
            index: RecordIndex::new(),
            queue: OpenQueue::new(),
            inconsistent: Vec::new(),
            epsilon: policy.starting_epsilon(),
            pass: 0,
            reopen_closed: policy.mode == SearchMode::AStar,
            best_goal: None,
            budget: SearchBudget::start(policy.timeout, policy.max_expansions),
            stats: SearchStats::default(),
        }
    }

    /// Create the start record (`g = 0`) and put it in the queue.
    pub(crate) fn seed(&mut self, node: N, key: String, h: f64) -> RecordId {
        let id = self.index.insert(SearchRecord {
            node,
            key,
            parent: None,
            edge_cost: 0.0,
            g: 0.0,
            h,
            status: RecordStatus::Open,
        });
        self.push_open(id);
        id
    }

    /// Queue an open record under the current ε.
    pub(crate) fn push_open(&mut self, id: RecordId) {
        let record = self.index.get(id);
        debug_assert!(record.is_open());
        let (f, g) = (record.f(self.epsilon), record.g);
        self.queue.insert(id, f, g);
    }

    /// An entry is live while its record is open and still has the `g` the
    /// entry was queued with.
    fn is_live(&self, entry: &QueueEntry) -> bool {
        let record = self.index.get(entry.id);
        record.is_open() && record.g.to_bits() == entry.g.to_bits()
    }

    /// Pop the best live entry, discarding stale ones on the way.
    pub(crate) fn pop_live(&mut self) -> Option<RecordId> {
        while let Some(entry) = self.queue.extract_min() {
            if self.is_live(&entry) {
                return Some(entry.id);
            }
            self.stats.stale_skipped += 1;
        }
        None
    }

    /// Smallest live priority, discarding stale entries from the top.
    pub(crate) fn peek_live_f(&mut self) -> Option<f64> {
        loop {
            let entry = *self.queue.peek_min()?;
            if self.is_live(&entry) {
                return Some(entry.f);
            }
            let _ = self.queue.extract_min();
            self.stats.stale_skipped += 1;
        }
    }

    /// Live open records in queue order.
    pub(crate) fn live_open(&self) -> Vec<RecordId> {
        self.queue
            .to_list()
            .iter()
            .filter(|e| self.is_live(e))
            .map(|e| e.id)
            .collect()
    }

    /// Remember `id` as the best goal if it beats the current one.
    pub(crate) fn offer_goal(&mut self, id: RecordId) -> bool {
        let better = match self.best_goal {
            None => true,
            Some(best) => self.index.get(id).g < self.index.get(best).g,
        };
        if better {
            self.best_goal = Some(id);
        }
        better
    }

    /// `min(cost, min over Open ∪ Inconsistent of g + h)` with the
    /// unscaled heuristic.
    pub(crate) fn lower_bound(&self, cost: f64) -> f64 {
        self.live_open()
            .into_iter()
            .chain(self.inconsistent.iter().copied())
            .map(|id| self.index.get(id).unscaled_f())
            .fold(cost, f64::min)
    }

    /// Start the next pass under `epsilon`: every live open record and every
    /// inconsistent record goes into a freshly built queue, the inconsistent
    /// set is cleared, and the pass counter advances.
    ///
    /// Heuristics are cached unscaled, so re-keying with the new ε is the
    /// same as rescaling a pre-multiplied cache by `ε_new / ε_old`.
    pub(crate) fn reschedule(&mut self, epsilon: f64) {
        let carried = self.live_open();
        let _ = self.queue.drain_sorted();
        let inconsistent = std::mem::take(&mut self.inconsistent);

        debug!(
            event = "reschedule",
            from_epsilon = self.epsilon,
            to_epsilon = epsilon,
            open = carried.len(),
            inconsistent = inconsistent.len(),
        );

        self.epsilon = epsilon;
        self.pass += 1;
        for id in carried.into_iter().chain(inconsistent) {
            self.index.get_mut(id).status = RecordStatus::Open;
            self.push_open(id);
        }
    }

    pub(crate) fn finish_stats(&mut self) -> SearchStats {
        self.stats.expansions = self.budget.expansions();
        self.stats.records = self.index.len() as u64;
        self.stats.queue_high_water = self.queue.high_water();
        self.stats.clone()
    }
}
