//! Service layer for appending and reading conversation messages.

use crate::conversation::{
    domain::{ChatMessage, Conversation, ConversationDomainError, Role},
    ports::{ConversationRepository, ConversationRepositoryError},
};
use crate::error::ErrorKind;
use crate::task::{
    domain::{TaskDomainError, TaskId, UserId},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for conversation operations.
#[derive(Debug, Error)]
pub enum ConversationServiceError {
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The requester does not own the task.
    #[error("user {requester} does not own task {task_id}")]
    Unauthorized {
        /// Task the requester tried to read or post to.
        task_id: TaskId,
        /// Requesting user.
        requester: UserId,
    },

    /// Message validation failed.
    #[error(transparent)]
    Domain(#[from] ConversationDomainError),

    /// Requester identifier failed validation.
    #[error(transparent)]
    Identity(#[from] TaskDomainError),

    /// Task store lookup failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// Conversation store operation failed.
    #[error(transparent)]
    Repository(#[from] ConversationRepositoryError),
}

impl ConversationServiceError {
    /// Returns the boundary classification for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) | Self::Tasks(TaskRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::Domain(err) => err.kind(),
            Self::Identity(err) => err.kind(),
            Self::Tasks(_) | Self::Repository(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for conversation service operations.
pub type ConversationServiceResult<T> = Result<T, ConversationServiceError>;

/// Conversation orchestration service.
///
/// Appends are gated on the task: the task must exist and the requester
/// must own it. The conversation itself is created lazily by the store on
/// the first append.
#[derive(Clone)]
pub struct ConversationService<T, V, C>
where
    T: TaskRepository,
    V: ConversationRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    conversations: Arc<V>,
    clock: Arc<C>,
}

impl<T, V, C> ConversationService<T, V, C>
where
    T: TaskRepository,
    V: ConversationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new conversation service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, conversations: Arc<V>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            conversations,
            clock,
        }
    }

    /// Appends a message to the task's conversation and returns the updated
    /// ordered sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ConversationServiceError::NotFound`] when the task does
    /// not exist, [`ConversationServiceError::Unauthorized`] when the
    /// requester does not own it, and a validation error when the content
    /// is blank.
    pub async fn append_message(
        &self,
        task_id: TaskId,
        requester: &str,
        role: Role,
        content: &str,
    ) -> ConversationServiceResult<Vec<ChatMessage>> {
        let requester_id = UserId::new(requester)?;
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(ConversationServiceError::NotFound(task_id))?;
        if task.owner() != &requester_id {
            return Err(ConversationServiceError::Unauthorized {
                task_id,
                requester: requester_id,
            });
        }

        let message = ChatMessage::new(role, content, &*self.clock)?;
        let messages = self
            .conversations
            .append_message(task_id, task.owner(), message)
            .await?;
        Ok(messages)
    }

    /// Returns the ordered message sequence for a task.
    ///
    /// Yields an empty sequence when no conversation exists, including
    /// after the owning task has been deleted.
    ///
    /// # Errors
    ///
    /// Returns [`ConversationServiceError::Repository`] when the store
    /// lookup fails.
    pub async fn get_messages(
        &self,
        task_id: TaskId,
    ) -> ConversationServiceResult<Vec<ChatMessage>> {
        let conversation = self.conversations.find_by_task(task_id).await?;
        Ok(conversation
            .map(Conversation::into_messages)
            .unwrap_or_default())
    }
}
