//! Typed search errors.
//!
//! `SearchError` covers pre-flight validation and fatal faults only. Soft
//! terminations (no path, timeout, expansion budget) are expressed via
//! [`crate::report::TerminationReason`] and still return a result.

/// Fatal failure of a search call.
#[derive(Debug, thiserror::Error)]
pub enum SearchError<E> {
    /// The policy failed pre-flight validation. No search steps were taken.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },

    /// The graph adapter or heuristic raised an error. Passed through as-is.
    #[error(transparent)]
    Adapter(E),

    /// An edge carried a negative or non-finite cost.
    #[error("edge {from_key} -> {to_key} has invalid cost {cost}")]
    InvalidEdgeCost {
        from_key: String,
        to_key: String,
        cost: f64,
    },

    /// The heuristic returned a negative or non-finite estimate.
    #[error("heuristic for {key} returned invalid value {value}")]
    InvalidHeuristic { key: String, value: f64 },

    /// Parent links did not lead back to the start record.
    #[error("parent chain from {key} does not terminate at the start record")]
    BrokenParentChain { key: String },
}

impl<E> SearchError<E> {
    /// Returns the adapter fault, if this error wraps one.
    #[must_use]
    pub fn adapter_fault(&self) -> Option<&E> {
        match self {
            Self::Adapter(e) => Some(e),
            _ => None,
        }
    }
}
