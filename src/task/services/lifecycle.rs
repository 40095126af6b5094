//! Service layer for task submission, retrieval, status updates, and
//! deletion.

use crate::conversation::domain::{ChatMessage, Conversation};
use crate::conversation::ports::{ConversationRepository, ConversationRepositoryError};
use crate::error::ErrorKind;
use crate::task::{
    domain::{
        AgentConfig, AgentKind, CourseId, FileRef, NewTaskParams, StatusUpdate, Task,
        TaskDomainError, TaskId, TaskName, TaskStatus, UserId,
    },
    ports::{TaskEventNotifier, TaskRepository, TaskRepositoryError, TaskStatusEvent},
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Number of tasks a listing returns when no limit is given.
pub const DEFAULT_LIST_LIMIT: usize = 20;

/// Submission payload for creating a task.
///
/// Mirrors the boundary shape `{ agentType, courseInstanceId, taskName,
/// config, files }`; owner identity arrives separately from the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSubmission {
    agent_type: AgentKind,
    course_instance_id: String,
    task_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    config: Option<AgentConfig>,
    #[serde(default)]
    files: Vec<FileRef>,
}

impl TaskSubmission {
    /// Creates a submission with required fields and no files.
    #[must_use]
    pub fn new(
        agent_type: AgentKind,
        course_instance_id: impl Into<String>,
        task_name: impl Into<String>,
    ) -> Self {
        Self {
            agent_type,
            course_instance_id: course_instance_id.into(),
            task_name: task_name.into(),
            config: None,
            files: Vec::new(),
        }
    }

    /// Sets the agent configuration.
    #[must_use]
    pub fn with_config(mut self, config: AgentConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the attached file references.
    #[must_use]
    pub fn with_files(mut self, files: impl IntoIterator<Item = FileRef>) -> Self {
        self.files = files.into_iter().collect();
        self
    }
}

/// Filters and pagination for a task listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    course: Option<CourseId>,
    status: Option<TaskStatus>,
    limit: Option<usize>,
}

impl ListQuery {
    /// Creates an unfiltered query with the default limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            course: None,
            status: None,
            limit: None,
        }
    }

    /// Restricts results to one course.
    #[must_use]
    pub fn with_course(mut self, course: CourseId) -> Self {
        self.course = Some(course);
        self
    }

    /// Restricts results to one lifecycle status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Caps the number of returned tasks.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Page of tasks returned by a listing, newest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPage {
    tasks: Vec<Task>,
    has_more: bool,
}

impl TaskPage {
    /// Returns the tasks on this page, newest first.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns `true` when results beyond this page exist.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Consumes the page and yields its tasks.
    #[must_use]
    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }
}

/// A task joined with its conversation's message sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetails {
    task: Task,
    messages: Vec<ChatMessage>,
}

impl TaskDetails {
    /// Returns the task record.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the conversation messages, empty when no thread exists.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Consumes the details and yields the task record.
    #[must_use]
    pub fn into_task(self) -> Task {
        self.task
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The requester does not own the task.
    #[error("user {requester} does not own task {task_id}")]
    Unauthorized {
        /// Task the requester tried to operate on.
        task_id: TaskId,
        /// Requesting user.
        requester: UserId,
    },

    /// Domain validation or state enforcement failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Task store operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Conversation store operation failed during a cascade.
    #[error(transparent)]
    Conversations(#[from] ConversationRepositoryError),
}

impl TaskLifecycleError {
    /// Returns the boundary classification for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) | Self::Repository(TaskRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::Domain(err) => err.kind(),
            Self::Repository(_) | Self::Conversations(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Owns the queue's bookkeeping: creation into `queued`, worker-reported
/// status updates, owner-scoped reads, and deletion with conversation
/// cascade. Status events go out through the notifier after the store
/// write; notification delivery never fails the operation it follows.
#[derive(Clone)]
pub struct TaskLifecycleService<R, V, N, C>
where
    R: TaskRepository,
    V: ConversationRepository,
    N: TaskEventNotifier,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    conversations: Arc<V>,
    notifier: Arc<N>,
    clock: Arc<C>,
}

impl<R, V, N, C> TaskLifecycleService<R, V, N, C>
where
    R: TaskRepository,
    V: ConversationRepository,
    N: TaskEventNotifier,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        conversations: Arc<V>,
        notifier: Arc<N>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            conversations,
            notifier,
            clock,
        }
    }

    /// Creates a task in the `queued` status and announces it.
    ///
    /// File lists pass through unvalidated; file and agent-type
    /// compatibility is the upload collaborator's concern.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the owner, course, or
    /// name fails validation and [`TaskLifecycleError::Repository`] when
    /// the store rejects persistence.
    pub async fn create(
        &self,
        owner: &str,
        submission: TaskSubmission,
    ) -> TaskLifecycleResult<Task> {
        let params = NewTaskParams {
            owner: UserId::new(owner)?,
            course: CourseId::new(submission.course_instance_id)?,
            name: TaskName::new(submission.task_name)?,
            agent_kind: submission.agent_type,
            config: submission.config,
            files: submission.files,
        };
        let task = Task::new(params, &*self.clock);
        self.repository.store(&task).await?;
        self.notifier.task_queued(&task).await;
        Ok(task)
    }

    /// Retrieves a task joined with its conversation messages.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not
    /// exist and [`TaskLifecycleError::Unauthorized`] when the requester
    /// does not own it.
    pub async fn get(&self, task_id: TaskId, requester: &str) -> TaskLifecycleResult<TaskDetails> {
        let requester_id = UserId::new(requester)?;
        let task = self.fetch_owned(task_id, &requester_id).await?;
        let messages = self
            .conversations
            .find_by_task(task_id)
            .await?
            .map(Conversation::into_messages)
            .unwrap_or_default();
        Ok(TaskDetails { task, messages })
    }

    /// Lists the requester's tasks, filtered, newest first, truncated to
    /// the query limit.
    ///
    /// Filtering happens before sorting and truncation; `has_more` flags
    /// that truncation dropped results. Cursor continuation is not
    /// offered.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the requester id fails
    /// validation and [`TaskLifecycleError::Repository`] when the store
    /// lookup fails.
    pub async fn list(&self, requester: &str, query: ListQuery) -> TaskLifecycleResult<TaskPage> {
        let owner = UserId::new(requester)?;
        let ListQuery {
            course,
            status,
            limit,
        } = query;

        let mut tasks = self.repository.list_by_owner(&owner).await?;
        tasks.retain(|task| {
            course.as_ref().is_none_or(|wanted| task.course() == wanted)
                && status.is_none_or(|wanted| task.status() == wanted)
        });
        tasks.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        let cap = limit.unwrap_or(DEFAULT_LIST_LIMIT);
        let has_more = tasks.len() > cap;
        tasks.truncate(cap);
        Ok(TaskPage { tasks, has_more })
    }

    /// Applies a worker-reported status update and announces the
    /// transition when the status changed.
    ///
    /// No ownership check happens here: callers are the trusted worker
    /// pipeline, not end users.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not
    /// exist and [`TaskLifecycleError::Domain`] when the update violates
    /// the state machine or its payload rules.
    pub async fn update_status(
        &self,
        task_id: TaskId,
        update: StatusUpdate,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self
            .repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))?;
        let previous = task.apply_status_update(update, &*self.clock)?;
        self.repository.update(&task).await?;

        if let Some(from) = previous {
            let event = TaskStatusEvent {
                task_id,
                owner: task.owner().clone(),
                from,
                to: task.status(),
                occurred_at: task.updated_at(),
            };
            self.notifier.status_changed(&event).await;
        }
        Ok(task)
    }

    /// Deletes a task and its conversation.
    ///
    /// Conversations are removed before the task record, so an interrupted
    /// delete leaves an orphaned task, never a dangling conversation under
    /// a live task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not
    /// exist and [`TaskLifecycleError::Unauthorized`] when the requester
    /// does not own it.
    pub async fn delete(&self, task_id: TaskId, requester: &str) -> TaskLifecycleResult<()> {
        let requester_id = UserId::new(requester)?;
        let task = self.fetch_owned(task_id, &requester_id).await?;
        self.conversations.delete_by_task(task_id).await?;
        self.repository.delete(task.id()).await?;
        Ok(())
    }

    /// Fetches a task and enforces ownership.
    async fn fetch_owned(
        &self,
        task_id: TaskId,
        requester: &UserId,
    ) -> TaskLifecycleResult<Task> {
        let task = self
            .repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))?;
        if task.owner() != requester {
            return Err(TaskLifecycleError::Unauthorized {
                task_id,
                requester: requester.clone(),
            });
        }
        Ok(task)
    }
}
