//! Service orchestration tests for the task lifecycle.

use std::sync::Arc;

use crate::conversation::adapters::memory::InMemoryConversationRepository;
use crate::conversation::domain::{ChatMessage, Role};
use crate::conversation::ports::ConversationRepository;
use crate::task::{
    adapters::memory::{InMemoryTaskRepository, RecordingTaskEventNotifier},
    domain::{
        AgentConfig, AgentKind, CourseId, FileRef, StatusUpdate, TaskId, TaskResult, TaskStatus,
        TaskUsage,
    },
    services::{ListQuery, TaskLifecycleError, TaskLifecycleService, TaskSubmission},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::json;

type TestService = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryConversationRepository,
    RecordingTaskEventNotifier,
    DefaultClock,
>;

struct Harness {
    service: TestService,
    conversations: Arc<InMemoryConversationRepository>,
    notifier: Arc<RecordingTaskEventNotifier>,
}

#[fixture]
fn harness() -> Harness {
    let conversations = Arc::new(InMemoryConversationRepository::new());
    let notifier = Arc::new(RecordingTaskEventNotifier::new());
    let service = TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::clone(&conversations),
        Arc::clone(&notifier),
        Arc::new(DefaultClock),
    );
    Harness {
        service,
        conversations,
        notifier,
    }
}

fn submission() -> TaskSubmission {
    let mut config = AgentConfig::new();
    config.insert("mode", json!("bullet"));
    TaskSubmission::new(AgentKind::NoteTaker, "course-7", "Chapter 3 Notes")
        .with_config(config)
        .with_files(vec![FileRef::new("f1")])
}

fn completion_update() -> StatusUpdate {
    StatusUpdate::new()
        .with_status(TaskStatus::Completed)
        .with_result(TaskResult::new("# Notes", "md"))
        .with_usage(TaskUsage::new(500, 1200, 0.02))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_persists_queued_task_and_announces_it(harness: Harness) {
    let task = harness
        .service
        .create("user-1", submission())
        .await
        .expect("task creation should succeed");

    assert_eq!(task.status(), TaskStatus::Queued);
    let details = harness
        .service
        .get(task.id(), "user-1")
        .await
        .expect("task should be retrievable");
    assert_eq!(details.task(), &task);
    assert!(details.messages().is_empty());
    assert_eq!(harness.notifier.queued_task_ids(), vec![task.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_blank_owner(harness: Harness) {
    let result = harness.service.create("   ", submission()).await;
    assert!(matches!(result, Err(TaskLifecycleError::Domain(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_rejects_non_owner(harness: Harness) {
    let task = harness
        .service
        .create("user-1", submission())
        .await
        .expect("task creation should succeed");

    let result = harness.service.get(task.id(), "user-2").await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Unauthorized { task_id, .. }) if task_id == task.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_reports_missing_task(harness: Harness) {
    let missing = TaskId::new();
    let result = harness.service.get(missing, "user-1").await;
    assert!(matches!(
        result,
        Err(TaskLifecycleError::NotFound(task_id)) if task_id == missing
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_joins_conversation_messages(harness: Harness) {
    let task = harness
        .service
        .create("user-1", submission())
        .await
        .expect("task creation should succeed");
    let message = ChatMessage::new(Role::User, "How is it going?", &DefaultClock)
        .expect("valid message");
    harness
        .conversations
        .append_message(task.id(), task.owner(), message.clone())
        .await
        .expect("append should succeed");

    let details = harness
        .service
        .get(task.id(), "user-1")
        .await
        .expect("task should be retrievable");

    assert_eq!(details.messages(), &[message]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_filters_sorts_and_truncates(harness: Harness) {
    for index in 0..3 {
        let name = format!("Task {index}");
        harness
            .service
            .create(
                "user-1",
                TaskSubmission::new(AgentKind::Researcher, "course-7", name),
            )
            .await
            .expect("task creation should succeed");
    }
    harness
        .service
        .create(
            "user-1",
            TaskSubmission::new(AgentKind::Researcher, "course-9", "Elsewhere"),
        )
        .await
        .expect("task creation should succeed");
    harness
        .service
        .create("user-2", submission())
        .await
        .expect("task creation should succeed");

    let page = harness
        .service
        .list("user-1", ListQuery::new().with_limit(2))
        .await
        .expect("listing should succeed");
    assert_eq!(page.tasks().len(), 2);
    assert!(page.has_more());
    let timestamps: Vec<_> = page.tasks().iter().map(|task| task.created_at()).collect();
    assert!(timestamps.is_sorted_by(|a, b| a >= b));

    let course_page = harness
        .service
        .list(
            "user-1",
            ListQuery::new()
                .with_course(CourseId::new("course-9").expect("valid course id")),
        )
        .await
        .expect("listing should succeed");
    assert_eq!(course_page.tasks().len(), 1);
    assert!(!course_page.has_more());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_filters_by_status(harness: Harness) {
    let task = harness
        .service
        .create("user-1", submission())
        .await
        .expect("task creation should succeed");
    harness
        .service
        .create("user-1", submission())
        .await
        .expect("task creation should succeed");
    harness
        .service
        .update_status(task.id(), completion_update())
        .await
        .expect("completion should succeed");

    let completed = harness
        .service
        .list(
            "user-1",
            ListQuery::new().with_status(TaskStatus::Completed),
        )
        .await
        .expect("listing should succeed");

    assert_eq!(completed.tasks().len(), 1);
    assert_eq!(
        completed.tasks().first().map(|found| found.id()),
        Some(task.id())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_status_announces_each_actual_transition(harness: Harness) {
    let task = harness
        .service
        .create("user-1", submission())
        .await
        .expect("task creation should succeed");

    harness
        .service
        .update_status(
            task.id(),
            StatusUpdate::new().with_status(TaskStatus::Processing),
        )
        .await
        .expect("transition should succeed");
    harness
        .service
        .update_status(
            task.id(),
            StatusUpdate::new().with_status(TaskStatus::Processing),
        )
        .await
        .expect("self transition should succeed");
    harness
        .service
        .update_status(task.id(), completion_update())
        .await
        .expect("completion should succeed");

    let events = harness.notifier.status_events();
    let transitions: Vec<(TaskStatus, TaskStatus)> =
        events.iter().map(|event| (event.from, event.to)).collect();
    assert_eq!(
        transitions,
        vec![
            (TaskStatus::Queued, TaskStatus::Processing),
            (TaskStatus::Processing, TaskStatus::Completed),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_status_reports_missing_task(harness: Harness) {
    let missing = TaskId::new();
    let result = harness
        .service
        .update_status(
            missing,
            StatusUpdate::new().with_status(TaskStatus::Processing),
        )
        .await;
    assert!(matches!(
        result,
        Err(TaskLifecycleError::NotFound(task_id)) if task_id == missing
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_cascades_conversation_and_removes_task(harness: Harness) {
    let task = harness
        .service
        .create("user-1", submission())
        .await
        .expect("task creation should succeed");
    let message =
        ChatMessage::new(Role::User, "first", &DefaultClock).expect("valid message");
    harness
        .conversations
        .append_message(task.id(), task.owner(), message)
        .await
        .expect("append should succeed");

    harness
        .service
        .delete(task.id(), "user-1")
        .await
        .expect("delete should succeed");

    let lookup = harness.service.get(task.id(), "user-1").await;
    assert!(matches!(lookup, Err(TaskLifecycleError::NotFound(_))));
    let thread = harness
        .conversations
        .find_by_task(task.id())
        .await
        .expect("lookup should succeed");
    assert!(thread.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_by_non_owner_leaves_task_intact(harness: Harness) {
    let task = harness
        .service
        .create("user-1", submission())
        .await
        .expect("task creation should succeed");

    let refusal = harness.service.delete(task.id(), "user-2").await;
    assert!(matches!(
        refusal,
        Err(TaskLifecycleError::Unauthorized { .. })
    ));

    let details = harness
        .service
        .get(task.id(), "user-1")
        .await
        .expect("task should remain retrievable");
    assert_eq!(details.task().id(), task.id());
}
