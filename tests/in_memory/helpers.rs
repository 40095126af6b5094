//! Shared fixtures for the in-memory queue harness.
//!
//! One set of in-memory stores backs every service, so a flow that spans
//! tasks, conversations, sharing, and telemetry observes a single queue.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use satchel::conversation::adapters::memory::InMemoryConversationRepository;
use satchel::conversation::services::ConversationService;
use satchel::sharing::adapters::memory::InMemoryTemplateRepository;
use satchel::sharing::services::SharingService;
use satchel::task::adapters::memory::InMemoryTaskRepository;
use satchel::task::adapters::notify::TracingTaskEventNotifier;
use satchel::task::domain::{
    AgentConfig, AgentKind, FileRef, Progress, StatusUpdate, Task, TaskId, TaskResult, TaskStatus,
    TaskUsage,
};
use satchel::task::services::{TaskLifecycleService, TaskSubmission};
use satchel::telemetry::domain::QueueHealthPolicy;
use satchel::telemetry::services::QueueStatsService;
use serde_json::json;

/// Task lifecycle service wired over the in-memory adapters.
pub type LifecycleService = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryConversationRepository,
    TracingTaskEventNotifier,
    DefaultClock,
>;

/// Conversation service sharing the harness stores.
pub type ChatService =
    ConversationService<InMemoryTaskRepository, InMemoryConversationRepository, DefaultClock>;

/// Sharing service over the harness stores.
pub type ShareService =
    SharingService<InMemoryTaskRepository, InMemoryTemplateRepository, DefaultClock>;

/// Telemetry service over the harness task store.
pub type StatsService = QueueStatsService<InMemoryTaskRepository, DefaultClock>;

/// Every queue service wired over one shared set of in-memory stores.
pub struct QueueHarness {
    /// Submission, status updates, listing, and deletion.
    pub lifecycle: LifecycleService,
    /// Per-task message threads.
    pub conversations: ChatService,
    /// Share links and templates.
    pub sharing: ShareService,
    /// Stats, health, and the dashboard.
    pub stats: StatsService,
}

/// Provides a fresh queue harness for each test.
#[fixture]
pub fn harness() -> QueueHarness {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let conversations = Arc::new(InMemoryConversationRepository::new());
    let templates = Arc::new(InMemoryTemplateRepository::new());
    let clock = Arc::new(DefaultClock);

    QueueHarness {
        lifecycle: TaskLifecycleService::new(
            Arc::clone(&tasks),
            Arc::clone(&conversations),
            Arc::new(TracingTaskEventNotifier::new()),
            Arc::clone(&clock),
        ),
        conversations: ConversationService::new(
            Arc::clone(&tasks),
            Arc::clone(&conversations),
            Arc::clone(&clock),
        ),
        sharing: SharingService::new(
            Arc::clone(&tasks),
            Arc::clone(&templates),
            Arc::clone(&clock),
        ),
        stats: QueueStatsService::new(tasks, clock, QueueHealthPolicy::new()),
    }
}

/// Note-taker submission matching the platform's boundary example.
pub fn note_submission() -> TaskSubmission {
    let mut config = AgentConfig::new();
    config.insert("mode", json!("bullet"));
    TaskSubmission::new(AgentKind::NoteTaker, "course-7", "Chapter 3 Notes")
        .with_config(config)
        .with_files([FileRef::new("f1")])
}

/// Moves a queued task into `processing` at ten percent progress.
///
/// # Errors
///
/// Returns an error when the transition is rejected.
pub async fn begin_processing(
    lifecycle: &LifecycleService,
    task_id: TaskId,
) -> eyre::Result<Task> {
    let update = StatusUpdate::new()
        .with_status(TaskStatus::Processing)
        .with_progress(Progress::new(10)?);
    Ok(lifecycle.update_status(task_id, update).await?)
}

/// Completes a task with the canonical worker payload.
///
/// # Errors
///
/// Returns an error when the transition is rejected.
pub async fn complete(lifecycle: &LifecycleService, task_id: TaskId) -> eyre::Result<Task> {
    let update = StatusUpdate::new()
        .with_status(TaskStatus::Completed)
        .with_result(TaskResult::new("# Notes\n\n- Key points", "md"))
        .with_usage(TaskUsage::new(500, 1200, 0.02));
    Ok(lifecycle.update_status(task_id, update).await?)
}

/// Fails a task with a worker-reported reason.
///
/// # Errors
///
/// Returns an error when the transition is rejected.
pub async fn fail(lifecycle: &LifecycleService, task_id: TaskId) -> eyre::Result<Task> {
    let update = StatusUpdate::new()
        .with_status(TaskStatus::Failed)
        .with_error("agent crashed");
    Ok(lifecycle.update_status(task_id, update).await?)
}
