//! Time and expansion budget for one search call.

use std::time::{Duration, Instant};

/// Which budget ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetExhaustion {
    Timeout,
    Expansions,
}

/// Cooperative budget, polled once per expansion.
///
/// The clock starts when the budget is created. Elapsed time is compared
/// against the limit rather than adding the limit to the start instant, so a
/// saturated `Duration::MAX` never overflows.
#[derive(Debug, Clone)]
pub struct SearchBudget {
    started: Instant,
    timeout: Duration,
    max_expansions: Option<u64>,
    expansions: u64,
}

impl SearchBudget {
    #[must_use]
    pub fn start(timeout: Duration, max_expansions: Option<u64>) -> Self {
        Self {
            started: Instant::now(),
            timeout,
            max_expansions,
            expansions: 0,
        }
    }

    /// Returns the exhausted budget, if any. The expansion cap is checked
    /// first so capped runs stop at the same point on every machine.
    #[must_use]
    pub fn exhausted(&self) -> Option<BudgetExhaustion> {
        if self.max_expansions.is_some_and(|cap| self.expansions >= cap) {
            return Some(BudgetExhaustion::Expansions);
        }
        if self.started.elapsed() >= self.timeout {
            return Some(BudgetExhaustion::Timeout);
        }
        None
    }

    pub fn record_expansion(&mut self) {
        self.expansions += 1;
    }

    #[must_use]
    pub fn expansions(&self) -> u64 {
        self.expansions
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
