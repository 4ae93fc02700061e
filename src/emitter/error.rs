use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors a listener invocation can produce.
///
/// These never escape [`publish`](crate::EventEmitter::publish) or
/// [`publish_async`](crate::EventEmitter::publish_async); they are captured
/// into [`Outcome::Failed`](crate::Outcome) entries so sibling listeners
/// always run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ListenerError {
    /// The listener itself reported a failure.
    #[error("listener failed: {0}")]
    Failed(String),
    /// An asynchronous callback was reached by a synchronous publication.
    /// Only `publish_async` can await it.
    #[error("asynchronous listener invoked during synchronous publication")]
    RequiresAsync,
}

impl ListenerError {
    /// Convenience constructor for listener-reported failures.
    ///
    /// # Example
    /// ```
    /// use tannoy::ListenerError;
    ///
    /// let err = ListenerError::msg("upstream rejected the payload");
    /// assert_eq!(err.to_string(), "listener failed: upstream rejected the payload");
    /// ```
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}
