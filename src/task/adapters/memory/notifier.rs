//! Recording notifier for asserting on emitted lifecycle events.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::domain::{Task, TaskId};
use crate::task::ports::{TaskEventNotifier, TaskStatusEvent};

/// Notifier that records every delivered event for later inspection.
///
/// Delivery is fire-and-forget, so a poisoned lock drops the event instead
/// of failing the caller.
#[derive(Debug, Clone, Default)]
pub struct RecordingTaskEventNotifier {
    state: Arc<RwLock<RecordedEvents>>,
}

#[derive(Debug, Default)]
struct RecordedEvents {
    queued: Vec<TaskId>,
    transitions: Vec<TaskStatusEvent>,
}

impl RecordingTaskEventNotifier {
    /// Creates a notifier with no recorded events.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the ids announced through `task_queued`, in delivery order.
    #[must_use]
    pub fn queued_task_ids(&self) -> Vec<TaskId> {
        self.state
            .read()
            .map(|events| events.queued.clone())
            .unwrap_or_default()
    }

    /// Returns the transitions announced through `status_changed`, in
    /// delivery order.
    #[must_use]
    pub fn status_events(&self) -> Vec<TaskStatusEvent> {
        self.state
            .read()
            .map(|events| events.transitions.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TaskEventNotifier for RecordingTaskEventNotifier {
    async fn task_queued(&self, task: &Task) {
        if let Ok(mut events) = self.state.write() {
            events.queued.push(task.id());
        }
    }

    async fn status_changed(&self, event: &TaskStatusEvent) {
        if let Ok(mut events) = self.state.write() {
            events.transitions.push(event.clone());
        }
    }
}
