//! Search policy types.

use std::time::Duration;

use crate::error::SearchError;

/// Which driver runs the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Anytime Repairing A*: repeated passes with shrinking ε.
    Anytime,
    /// Classic A*: one pass at ε = 1, closed records are re-opened when a
    /// cheaper path is found.
    AStar,
}

/// Search budget and inflation schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPolicy {
    /// Driver selection.
    pub mode: SearchMode,
    /// Heuristic inflation factor for the first pass. Ignored in `AStar` mode.
    pub epsilon_initial: f64,
    /// Amount subtracted from ε between passes (floored at 1).
    pub epsilon_step: f64,
    /// Advisory wall-clock budget, polled once per expansion.
    pub timeout: Duration,
    /// Slack allowed when testing `bound ≤ 1`.
    pub bound_tolerance: f64,
    /// Hard cap on node expansions across all passes.
    pub max_expansions: Option<u64>,
}

impl SearchPolicy {
    /// Classic A* policy with the given time budget.
    #[must_use]
    pub fn astar(timeout: Duration) -> Self {
        Self {
            mode: SearchMode::AStar,
            epsilon_initial: 1.0,
            timeout,
            ..Self::default()
        }
    }

    /// Anytime policy starting at `epsilon_initial` with the given time budget.
    #[must_use]
    pub fn anytime(epsilon_initial: f64, timeout: Duration) -> Self {
        Self {
            epsilon_initial,
            timeout,
            ..Self::default()
        }
    }

    /// The ε used for the first pass.
    #[must_use]
    pub fn starting_epsilon(&self) -> f64 {
        match self.mode {
            SearchMode::Anytime => self.epsilon_initial,
            SearchMode::AStar => 1.0,
        }
    }

    /// Validate numeric ranges.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if ε is below 1 or non-finite,
    /// the step is not strictly positive, or the tolerance is negative.
    pub fn validate<E>(&self) -> Result<(), SearchError<E>> {
        if !self.epsilon_initial.is_finite() || self.epsilon_initial < 1.0 {
            return Err(SearchError::InvalidPolicy {
                detail: format!(
                    "epsilon_initial must be finite and >= 1, got {}",
                    self.epsilon_initial
                ),
            });
        }
        if !self.epsilon_step.is_finite() || self.epsilon_step <= 0.0 {
            return Err(SearchError::InvalidPolicy {
                detail: format!(
                    "epsilon_step must be finite and > 0, got {}",
                    self.epsilon_step
                ),
            });
        }
        if !self.bound_tolerance.is_finite() || self.bound_tolerance < 0.0 {
            return Err(SearchError::InvalidPolicy {
                detail: format!(
                    "bound_tolerance must be finite and >= 0, got {}",
                    self.bound_tolerance
                ),
            });
        }
        Ok(())
    }

    /// Canonical JSON echo of the policy (sorted keys, floats as strings).
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "bound_tolerance": self.bound_tolerance.to_string(),
            "epsilon_initial": self.epsilon_initial.to_string(),
            "epsilon_step": self.epsilon_step.to_string(),
            "max_expansions": self.max_expansions,
            "mode": mode_str(self.mode),
            "timeout_ms": u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
        })
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            mode: SearchMode::Anytime,
            epsilon_initial: 3.0,
            epsilon_step: 0.5,
            timeout: Duration::from_secs(10),
            bound_tolerance: 1e-9,
            max_expansions: None,
        }
    }
}

fn mode_str(mode: SearchMode) -> &'static str {
    match mode {
        SearchMode::Anytime => "anytime",
        SearchMode::AStar => "astar",
    }
}

/// Convert a caller-supplied number of seconds into a budget.
///
/// Negative and NaN inputs become a zero budget; values too large for a
/// `Duration` saturate.
#[must_use]
pub fn timeout_from_secs(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}
