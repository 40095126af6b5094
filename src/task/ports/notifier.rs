//! Outbound notification port for task status events.

use crate::task::domain::{Task, TaskId, TaskStatus, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Status transition details handed to notifier implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStatusEvent {
    /// Task whose status changed.
    pub task_id: TaskId,
    /// Owner of the task.
    pub owner: UserId,
    /// Status before the transition.
    pub from: TaskStatus,
    /// Status after the transition.
    pub to: TaskStatus,
    /// Instant the transition was applied.
    pub occurred_at: DateTime<Utc>,
}

/// One-way notification contract for task lifecycle events.
///
/// Delivery is fire-and-forget: implementations absorb their own failures,
/// and a lost notification never fails the state change it accompanies.
/// At-least-once delivery is the dispatcher's concern behind this port.
#[async_trait]
pub trait TaskEventNotifier: Send + Sync {
    /// Announces that a newly created task entered the queue.
    async fn task_queued(&self, task: &Task);

    /// Announces a status transition.
    async fn status_changed(&self, event: &TaskStatusEvent);
}
