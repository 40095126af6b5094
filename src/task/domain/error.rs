//! Error types for task domain validation and state enforcement.

use super::{TaskId, TaskStatus};
use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The owner identifier is empty after trimming.
    #[error("owner id must not be empty")]
    EmptyUserId,

    /// The course identifier is empty after trimming.
    #[error("course id must not be empty")]
    EmptyCourseId,

    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// The progress value exceeds the 0-100 range.
    #[error("progress value {0} is out of range, expected 0-100")]
    ProgressOutOfRange(u8),

    /// The requested status transition is not in the transition table.
    #[error("task {task_id} cannot transition from {from} to {to}")]
    InvalidStatusTransition {
        /// Task being updated.
        task_id: TaskId,
        /// Status the task currently holds.
        from: TaskStatus,
        /// Status the update requested.
        to: TaskStatus,
    },

    /// The task already reached a terminal status and rejects every update.
    #[error("task {task_id} is already {status} and can no longer be updated")]
    TaskAlreadyTerminal {
        /// Task being updated.
        task_id: TaskId,
        /// Terminal status the task holds.
        status: TaskStatus,
    },

    /// A completing update omitted its result or usage payload.
    #[error("task {task_id} cannot complete without a result and usage")]
    MissingCompletionPayload {
        /// Task being completed.
        task_id: TaskId,
    },

    /// A failing update omitted its error message.
    #[error("task {task_id} cannot fail without an error message")]
    MissingFailureReason {
        /// Task being failed.
        task_id: TaskId,
    },

    /// Result or usage fields accompanied an update that does not complete
    /// the task.
    #[error("task {task_id}: result and usage may only accompany completion")]
    ResultRequiresCompletion {
        /// Task being updated.
        task_id: TaskId,
    },

    /// An error message accompanied an update that does not fail the task.
    #[error("task {task_id}: an error message may only accompany failure")]
    ErrorRequiresFailure {
        /// Task being updated.
        task_id: TaskId,
    },

    /// Share settings were attached to a task that has not completed.
    #[error("task {task_id} is {status}; only completed tasks can be shared")]
    ShareRequiresCompletion {
        /// Task being shared.
        task_id: TaskId,
        /// Status the task currently holds.
        status: TaskStatus,
    },
}

impl TaskDomainError {
    /// Returns the boundary classification for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyUserId
            | Self::EmptyCourseId
            | Self::EmptyTaskName
            | Self::ProgressOutOfRange(_)
            | Self::MissingCompletionPayload { .. }
            | Self::MissingFailureReason { .. }
            | Self::ResultRequiresCompletion { .. }
            | Self::ErrorRequiresFailure { .. } => ErrorKind::Validation,
            Self::InvalidStatusTransition { .. }
            | Self::TaskAlreadyTerminal { .. }
            | Self::ShareRequiresCompletion { .. } => ErrorKind::InvalidState,
        }
    }
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing agent kinds from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown agent kind: {0}")]
pub struct ParseAgentKindError(pub String);
