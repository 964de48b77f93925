//! Task error types and result alias.

use thiserror::Error;

use super::Phase;

/// Result type alias for task lifecycle operations.
pub type TaskResult<T> = Result<T, TaskError>;

/// Errors raised by task lifecycle phases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// The bound descriptor set does not have the shape this task requires.
    ///
    /// Raised by `validate`; the remaining phases must not be invoked.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A phase after validation failed. Terminal for the current run.
    #[error("{phase} failed: {message}")]
    PhaseFailure {
        /// Phase that reported the failure.
        phase: Phase,
        /// Human-readable failure description.
        message: String,
    },

    /// A descriptor's declared element count is inconsistent with the memory
    /// it references.
    #[error("malformed descriptor: {0}")]
    MalformedDescriptor(String),
}

impl TaskError {
    /// Creates an [`TaskError::InvalidInput`] from any message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a [`TaskError::PhaseFailure`] for the given phase.
    pub fn phase(phase: Phase, message: impl Into<String>) -> Self {
        Self::PhaseFailure {
            phase,
            message: message.into(),
        }
    }
}
