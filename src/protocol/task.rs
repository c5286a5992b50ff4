//! A2A task types and lifecycle enforcement

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    artifact::Artifact,
    error::{A2AError, A2AResult},
    message::{Message, Metadata},
};

/// A task in the A2A protocol
///
/// Tasks represent asynchronous units of work performed by agents. They
/// have a lifecycle from submitted to a terminal state, an append-only
/// message history, and any artifacts the agent produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier for the task
    pub id: String,

    /// Session grouping related tasks
    #[serde(rename = "sessionId")]
    pub session_id: String,

    /// Current status of the task
    pub status: TaskStatus,

    /// Chronological, append-only log of messages exchanged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<Message>>,

    /// Artifacts produced by the agent, ordered by index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<Vec<Artifact>>,

    /// Free-form task metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    /// Latest status timestamp observed on this task. Kept separately
    /// from `status` so an untimestamped status update cannot erase the
    /// monotonicity watermark. Local bookkeeping, not wire state.
    #[serde(skip)]
    last_timestamp: Option<DateTime<Utc>>,
}

impl PartialEq for Task {
    // the watermark is bookkeeping, not part of the task's value
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.session_id == other.session_id
            && self.status == other.status
            && self.history == other.history
            && self.artifacts == other.artifacts
            && self.metadata == other.metadata
    }
}

impl Task {
    /// Create a new task in the `submitted` state
    pub fn new(id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            session_id: session_id.into(),
            status: TaskStatus::new(TaskState::Submitted),
            history: None,
            artifacts: None,
            metadata: None,
            last_timestamp: None,
        }
    }

    /// Check if the task has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        self.status.state.is_terminal()
    }

    /// Check if the task is still being processed
    pub fn is_processing(&self) -> bool {
        matches!(
            self.status.state,
            TaskState::Submitted | TaskState::Working
        )
    }

    /// Apply a status update, enforcing the task lifecycle
    ///
    /// Rejects any update on a terminal task and any transition along an
    /// undefined edge with [`A2AError::InvalidTransition`]. A status
    /// timestamp earlier than the last observed one is rejected as stale.
    /// A message carried by the status is appended to the history.
    pub fn apply_status(&mut self, status: TaskStatus) -> A2AResult<()> {
        let from = self.status.state;
        let to = status.state;

        if !from.can_transition_to(to) {
            return Err(A2AError::invalid_transition(from, to));
        }

        if let Some(next) = status.timestamp {
            // after deserialization the watermark re-seeds from the
            // current status
            if let Some(prev) = self.last_timestamp.or(self.status.timestamp) {
                if next < prev {
                    return Err(A2AError::Validation(format!(
                        "status timestamp {next} is earlier than last observed {prev}"
                    )));
                }
            }
            self.last_timestamp = Some(next);
        }

        if let Some(message) = &status.message {
            message.validate()?;
            self.history
                .get_or_insert_with(Vec::new)
                .push(message.clone());
        }

        self.status = status;
        Ok(())
    }

    /// Append a message to the task history
    ///
    /// Terminal tasks have a frozen history; appending to one is rejected
    /// as an invalid transition.
    pub fn append_message(&mut self, message: Message) -> A2AResult<()> {
        if self.is_terminal() {
            return Err(A2AError::invalid_transition(
                self.status.state,
                self.status.state,
            ));
        }
        message.validate()?;
        self.history.get_or_insert_with(Vec::new).push(message);
        Ok(())
    }

    /// Record a completed artifact, keeping artifacts ordered by index
    pub fn push_artifact(&mut self, artifact: Artifact) {
        let artifacts = self.artifacts.get_or_insert_with(Vec::new);
        let pos = artifacts
            .iter()
            .position(|a| a.index > artifact.index)
            .unwrap_or(artifacts.len());
        artifacts.insert(pos, artifact);
    }
}

/// Task lifecycle states
///
/// Task lifecycle: submitted → working → completed/canceled/failed, with
/// working ↔ input-required for multi-turn input. `unknown` is a
/// consumer-side fallback for unrecognized states, never set by a
/// well-behaved producer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    /// Task has been received and is queued for processing
    Submitted,

    /// Task is currently being processed
    Working,

    /// Task requires additional input from the caller
    InputRequired,

    /// Task completed successfully
    Completed,

    /// Task was canceled by the caller or the system
    Canceled,

    /// Task failed with an unrecoverable error
    Failed,

    /// State not recognized by this consumer
    Unknown,
}

impl TaskState {
    /// Check if this is a terminal (absorbing) state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Canceled | TaskState::Failed
        )
    }

    /// Check whether a transition from this state to `next` is a defined
    /// lifecycle edge
    ///
    /// Terminal states have no outgoing edges. Any non-terminal state may
    /// fall back to `unknown`, and `unknown` may resynchronize to any
    /// state. Same-state updates of a non-terminal state are allowed so a
    /// producer can refresh the status message mid-flight.
    pub fn can_transition_to(&self, next: TaskState) -> bool {
        use TaskState::*;

        if self.is_terminal() {
            return false;
        }
        match (*self, next) {
            (_, Unknown) | (Unknown, _) => true,
            (from, to) if from == to => true,
            (Submitted, Working | Canceled | Failed) => true,
            (Working, InputRequired | Completed | Canceled | Failed) => true,
            (InputRequired, Working) => true,
            _ => false,
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskState::Submitted => "submitted",
            TaskState::Working => "working",
            TaskState::InputRequired => "input-required",
            TaskState::Completed => "completed",
            TaskState::Canceled => "canceled",
            TaskState::Failed => "failed",
            TaskState::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A task status: the current state, the latest communication associated
/// with it, and when it was observed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskStatus {
    /// Current lifecycle state
    pub state: TaskState,

    /// Latest message associated with this state change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,

    /// When this status was produced, monotonically non-decreasing
    /// across successive statuses of one task
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TaskStatus {
    /// Create a status for `state` stamped with the current time
    pub fn new(state: TaskState) -> Self {
        Self {
            state,
            message: None,
            timestamp: Some(Utc::now()),
        }
    }

    /// Attach the message associated with this state change
    pub fn with_message(mut self, message: Message) -> Self {
        self.message = Some(message);
        self
    }

    /// Set an explicit timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}
