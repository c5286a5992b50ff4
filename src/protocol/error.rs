//! Error types for A2A model operations

use thiserror::Error;

use super::task::TaskState;

/// Main error type for A2A model operations
///
/// Every failure here is a local validation failure surfaced to the caller
/// as a rejected operation. Nothing is silently coerced.
#[derive(Debug, Error)]
pub enum A2AError {
    /// Attempted task state transition along an undefined edge,
    /// including any transition out of a terminal state
    #[error("Invalid task transition: {from} -> {to}")]
    InvalidTransition {
        /// State the task was in
        from: TaskState,

        /// State the update tried to move to
        to: TaskState,
    },

    /// A message or artifact part that violates the part contract
    /// (e.g. a file part with neither bytes nor uri)
    #[error("Malformed part: {0}")]
    MalformedPart(String),

    /// Artifact fragment received out of order, or for an already
    /// sealed artifact index
    #[error("Stream order violation at artifact index {index}: {reason}")]
    StreamOrderViolation {
        /// Artifact index the fragment targeted
        index: u32,

        /// What went wrong
        reason: String,
    },

    /// Validation error (invalid card, message, or status update)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Task not found in the store
    #[error("Task not found: {task_id}")]
    TaskNotFound { task_id: String },

    /// Agent not found in the registry
    #[error("Agent not found: {agent_id}")]
    AgentNotFound { agent_id: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for A2A model operations
pub type A2AResult<T> = Result<T, A2AError>;

impl A2AError {
    /// Build an invalid-transition error for a rejected status update
    pub fn invalid_transition(from: TaskState, to: TaskState) -> Self {
        A2AError::InvalidTransition { from, to }
    }

    /// Build a stream-order-violation error for an artifact fragment
    pub fn stream_order(index: u32, reason: impl Into<String>) -> Self {
        A2AError::StreamOrderViolation {
            index,
            reason: reason.into(),
        }
    }
}
