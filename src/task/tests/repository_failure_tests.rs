//! Store failure propagation through the task lifecycle service.

use std::io;
use std::sync::Arc;

use crate::conversation::adapters::memory::InMemoryConversationRepository;
use crate::error::ErrorKind;
use crate::task::{
    adapters::memory::RecordingTaskEventNotifier,
    domain::{AgentKind, ShareToken, Task, TaskId, UserId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    services::{ListQuery, TaskLifecycleError, TaskLifecycleService, TaskSubmission},
};
use mockable::DefaultClock;
use mockall::mock;
use rstest::rstest;

mock! {
    TaskStore {}

    #[async_trait::async_trait]
    impl TaskRepository for TaskStore {
        async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;
        async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;
        async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;
        async fn find_by_share_token(
            &self,
            token: &ShareToken,
        ) -> TaskRepositoryResult<Option<Task>>;
        async fn list_by_owner(&self, owner: &UserId) -> TaskRepositoryResult<Vec<Task>>;
        async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
        async fn scan(&self) -> TaskRepositoryResult<Vec<Task>>;
    }
}

fn disk_offline() -> TaskRepositoryError {
    TaskRepositoryError::persistence(io::Error::other("disk offline"))
}

struct Harness {
    service: TaskLifecycleService<
        MockTaskStore,
        InMemoryConversationRepository,
        RecordingTaskEventNotifier,
        DefaultClock,
    >,
    notifier: Arc<RecordingTaskEventNotifier>,
}

fn harness(repository: MockTaskStore) -> Harness {
    let notifier = Arc::new(RecordingTaskEventNotifier::new());
    let service = TaskLifecycleService::new(
        Arc::new(repository),
        Arc::new(InMemoryConversationRepository::new()),
        Arc::clone(&notifier),
        Arc::new(DefaultClock),
    );
    Harness { service, notifier }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_propagates_store_failure_without_announcing() {
    let mut repository = MockTaskStore::new();
    repository.expect_store().returning(|_| Err(disk_offline()));
    let harness = harness(repository);

    let result = harness
        .service
        .create(
            "user-1",
            TaskSubmission::new(AgentKind::NoteTaker, "course-7", "Doomed"),
        )
        .await;

    let Err(error) = result else {
        panic!("expected store failure to propagate");
    };
    assert!(matches!(
        error,
        TaskLifecycleError::Repository(TaskRepositoryError::Persistence(_))
    ));
    assert_eq!(error.kind(), ErrorKind::Internal);
    assert!(harness.notifier.queued_task_ids().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_propagates_lookup_failure() {
    let mut repository = MockTaskStore::new();
    repository
        .expect_list_by_owner()
        .returning(|_| Err(disk_offline()));
    let harness = harness(repository);

    let result = harness.service.list("user-1", ListQuery::new()).await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Repository(
            TaskRepositoryError::Persistence(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_propagates_find_failure() {
    let mut repository = MockTaskStore::new();
    repository
        .expect_find_by_id()
        .returning(|_| Err(disk_offline()));
    let harness = harness(repository);

    let result = harness.service.delete(TaskId::new(), "user-1").await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Repository(
            TaskRepositoryError::Persistence(_)
        ))
    ));
}
