use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ListenerError;

/// Per-listener publication result.
///
/// A publication returns one `Outcome` per listener that was registered when
/// the snapshot was taken, in invocation order. A listener failure is captured
/// here instead of being surfaced to the publisher; callers that only care
/// about values can project through [`Outcome::value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// The listener completed and returned this value.
    Ok(Value),
    /// The listener failed; the failure was logged and captured.
    Failed(FailureDetail),
}

/// Diagnostic record of a captured listener failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureDetail {
    /// Event name being published when the listener failed.
    pub event: String,
    /// The captured error.
    pub error: ListenerError,
    /// When the failure was captured.
    pub when: DateTime<Utc>,
}

impl Outcome {
    pub(crate) fn capture(event: &str, error: ListenerError) -> Self {
        Outcome::Failed(FailureDetail {
            event: event.to_string(),
            error,
            when: Utc::now(),
        })
    }

    /// The listener's return value, or `None` for a captured failure.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Outcome::Ok(value) => Some(value),
            Outcome::Failed(_) => None,
        }
    }

    /// Consume the outcome, yielding the value for successes.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Outcome::Ok(value) => Some(value),
            Outcome::Failed(_) => None,
        }
    }

    /// True when this entry records a captured failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    /// The failure record, if any.
    pub fn failure(&self) -> Option<&FailureDetail> {
        match self {
            Outcome::Ok(_) => None,
            Outcome::Failed(detail) => Some(detail),
        }
    }
}
