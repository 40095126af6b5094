//! Tracing-backed notifier for task lifecycle events.

use crate::task::domain::Task;
use crate::task::ports::{TaskEventNotifier, TaskStatusEvent};
use async_trait::async_trait;
use tracing::info;

/// Notifier that emits structured `tracing` events.
///
/// Stands in for the platform's outbound dispatcher in deployments that only
/// need an operational log of lifecycle activity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTaskEventNotifier;

impl TracingTaskEventNotifier {
    /// Creates the notifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TaskEventNotifier for TracingTaskEventNotifier {
    async fn task_queued(&self, task: &Task) {
        info!(
            task_id = %task.id(),
            owner = %task.owner(),
            agent_kind = %task.agent_kind(),
            "task queued"
        );
    }

    async fn status_changed(&self, event: &TaskStatusEvent) {
        info!(
            task_id = %event.task_id,
            owner = %event.owner,
            from = %event.from,
            to = %event.to,
            "task status changed"
        );
    }
}
