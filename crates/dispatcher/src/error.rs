//! Handler error types.

use thiserror::Error;

/// Errors a handler can report back to the dispatcher.
///
/// A handler error never stops delivery to the remaining handlers.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The side effect could not be performed.
    #[error("Handler failed: {0}")]
    Failed(String),

    /// The handler received an event it does not understand.
    #[error("Unexpected event: {0}")]
    UnexpectedEvent(String),
}

impl HandlerError {
    /// Creates a generic failure from anything displayable.
    pub fn failed(reason: impl std::fmt::Display) -> Self {
        Self::Failed(reason.to_string())
    }
}
