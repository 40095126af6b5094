//! Task aggregate root and related lifecycle types.

use super::{
    AgentConfig, AgentKind, CourseId, FileRef, Progress, ShareSettings, TaskDomainError, TaskId,
    TaskName, TaskResult, TaskStatus, TaskUsage, UserId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Fields a status update may patch onto a task.
///
/// Absent fields leave the stored value unchanged; they are never nulled.
/// Which combinations are legal depends on the requested status and is
/// enforced by [`Task::apply_status_update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusUpdate {
    status: Option<TaskStatus>,
    progress: Option<Progress>,
    result: Option<TaskResult>,
    usage: Option<TaskUsage>,
    error: Option<String>,
}

impl StatusUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a status transition.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Patches the progress indicator.
    #[must_use]
    pub const fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Carries the completion result payload.
    #[must_use]
    pub fn with_result(mut self, result: TaskResult) -> Self {
        self.result = Some(result);
        self
    }

    /// Carries the completion usage record.
    #[must_use]
    pub const fn with_usage(mut self, usage: TaskUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Carries the failure message.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Requested status transition, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Patched progress value, if any.
    #[must_use]
    pub const fn progress(&self) -> Option<Progress> {
        self.progress
    }

    /// Completion result payload, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&TaskResult> {
        self.result.as_ref()
    }

    /// Completion usage record, if any.
    #[must_use]
    pub const fn usage(&self) -> Option<TaskUsage> {
        self.usage
    }

    /// Failure message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Task aggregate root.
///
/// Serialised field names follow the submission payload vocabulary
/// (`agentType`, `courseInstanceId`, `taskName`) so a stored record and its
/// boundary representation share one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    owner: UserId,
    #[serde(rename = "courseInstanceId")]
    course: CourseId,
    #[serde(rename = "taskName")]
    name: TaskName,
    #[serde(rename = "agentType")]
    agent_kind: AgentKind,
    status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    config: Option<AgentConfig>,
    files: Vec<FileRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    progress: Option<Progress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result: Option<TaskResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    usage: Option<TaskUsage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    share: Option<ShareSettings>,
}

/// Parameter object for creating a new task.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTaskParams {
    /// Owner of the task; immutable after creation.
    pub owner: UserId,
    /// Course the task belongs to.
    pub course: CourseId,
    /// Human-readable task name.
    pub name: TaskName,
    /// Agent variety that will execute the task.
    pub agent_kind: AgentKind,
    /// Per-task agent configuration, if any.
    pub config: Option<AgentConfig>,
    /// Files attached to the task; may be empty.
    pub files: Vec<FileRef>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner identifier.
    pub owner: UserId,
    /// Persisted course identifier.
    pub course: CourseId,
    /// Persisted task name.
    pub name: TaskName,
    /// Persisted agent variety.
    pub agent_kind: AgentKind,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted agent configuration, if any.
    pub config: Option<AgentConfig>,
    /// Persisted file references.
    pub files: Vec<FileRef>,
    /// Persisted progress indicator, if any.
    pub progress: Option<Progress>,
    /// Persisted completion result, if any.
    pub result: Option<TaskResult>,
    /// Persisted usage record, if any.
    pub usage: Option<TaskUsage>,
    /// Persisted failure message, if any.
    pub error: Option<String>,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted share settings, if any.
    pub share: Option<ShareSettings>,
}

impl Task {
    /// Creates a new task in the `queued` status.
    #[must_use]
    pub fn new(params: NewTaskParams, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            owner: params.owner,
            course: params.course,
            name: params.name,
            agent_kind: params.agent_kind,
            status: TaskStatus::Queued,
            config: params.config,
            files: params.files,
            progress: None,
            result: None,
            usage: None,
            error: None,
            completed_at: None,
            created_at: timestamp,
            updated_at: timestamp,
            share: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            course: data.course,
            name: data.name,
            agent_kind: data.agent_kind,
            status: data.status,
            config: data.config,
            files: data.files,
            progress: data.progress,
            result: data.result,
            usage: data.usage,
            error: data.error,
            completed_at: data.completed_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
            share: data.share,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owner identifier.
    #[must_use]
    pub const fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Returns the course identifier.
    #[must_use]
    pub const fn course(&self) -> &CourseId {
        &self.course
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the agent variety.
    #[must_use]
    pub const fn agent_kind(&self) -> AgentKind {
        self.agent_kind
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the agent configuration, if any.
    #[must_use]
    pub const fn config(&self) -> Option<&AgentConfig> {
        self.config.as_ref()
    }

    /// Returns the attached file references.
    #[must_use]
    pub fn files(&self) -> &[FileRef] {
        &self.files
    }

    /// Returns the progress indicator, if any.
    #[must_use]
    pub const fn progress(&self) -> Option<Progress> {
        self.progress
    }

    /// Returns the completion result, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&TaskResult> {
        self.result.as_ref()
    }

    /// Returns the usage record, if any.
    #[must_use]
    pub const fn usage(&self) -> Option<TaskUsage> {
        self.usage
    }

    /// Returns the failure message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the completion timestamp, if any.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the share settings, if the task has been shared.
    #[must_use]
    pub const fn share(&self) -> Option<&ShareSettings> {
        self.share.as_ref()
    }

    /// Returns the instant the task reached its terminal status.
    ///
    /// Completed tasks report their completion timestamp; failed tasks
    /// report their final mutation timestamp, which freezes at the failing
    /// transition because terminal tasks reject further updates.
    #[must_use]
    pub const fn terminal_at(&self) -> Option<DateTime<Utc>> {
        match self.status {
            TaskStatus::Completed => self.completed_at,
            TaskStatus::Failed => Some(self.updated_at),
            TaskStatus::Queued | TaskStatus::Processing => None,
        }
    }

    /// Applies a partial status update reported by the worker pipeline.
    ///
    /// Returns the previous status when the update changed the status, so
    /// callers can emit a transition event; `None` when the status is
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskAlreadyTerminal`] when the task is
    /// already completed or failed,
    /// [`TaskDomainError::InvalidStatusTransition`] when the requested
    /// status is not reachable from the current one, and a validation error
    /// when the update's payload fields do not match the requested status
    /// (completion requires result and usage, failure requires an error
    /// message, and neither may accompany any other update).
    pub fn apply_status_update(
        &mut self,
        update: StatusUpdate,
        clock: &impl Clock,
    ) -> Result<Option<TaskStatus>, TaskDomainError> {
        if self.status.is_terminal() {
            return Err(TaskDomainError::TaskAlreadyTerminal {
                task_id: self.id,
                status: self.status,
            });
        }
        if let Some(target) = update.status
            && !self.status.can_transition_to(target)
        {
            return Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to: target,
            });
        }
        validate_update_payload(self.id, &update)?;

        let now = clock.utc();
        let previous = self.status;
        if let Some(target) = update.status {
            self.status = target;
        }
        if let Some(progress) = update.progress {
            self.progress = Some(progress);
        }
        match self.status {
            TaskStatus::Completed => {
                self.result = update.result;
                self.usage = update.usage;
                self.completed_at = Some(now);
            }
            TaskStatus::Failed => {
                self.error = update.error;
            }
            TaskStatus::Queued | TaskStatus::Processing => {}
        }
        self.updated_at = now;
        Ok((previous != self.status).then_some(previous))
    }

    /// Attaches share settings, replacing any existing share.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ShareRequiresCompletion`] unless the task
    /// status is `completed`.
    pub fn attach_share(
        &mut self,
        settings: ShareSettings,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if self.status != TaskStatus::Completed {
            return Err(TaskDomainError::ShareRequiresCompletion {
                task_id: self.id,
                status: self.status,
            });
        }
        self.share = Some(settings);
        self.touch(clock);
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Checks that the update's payload fields match its requested status.
fn validate_update_payload(task_id: TaskId, update: &StatusUpdate) -> Result<(), TaskDomainError> {
    match update.status {
        Some(TaskStatus::Completed) => {
            if update.result.is_none() || update.usage.is_none() {
                return Err(TaskDomainError::MissingCompletionPayload { task_id });
            }
            if update.error.is_some() {
                return Err(TaskDomainError::ErrorRequiresFailure { task_id });
            }
        }
        Some(TaskStatus::Failed) => {
            if update.error.is_none() {
                return Err(TaskDomainError::MissingFailureReason { task_id });
            }
            if update.result.is_some() || update.usage.is_some() {
                return Err(TaskDomainError::ResultRequiresCompletion { task_id });
            }
        }
        Some(TaskStatus::Queued | TaskStatus::Processing) | None => {
            if update.result.is_some() || update.usage.is_some() {
                return Err(TaskDomainError::ResultRequiresCompletion { task_id });
            }
            if update.error.is_some() {
                return Err(TaskDomainError::ErrorRequiresFailure { task_id });
            }
        }
    }
    Ok(())
}
