//! Repository port for conversation persistence.

use crate::conversation::domain::{ChatMessage, Conversation};
use crate::task::domain::{TaskId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for conversation repository operations.
pub type ConversationRepositoryResult<T> = Result<T, ConversationRepositoryError>;

/// Conversation persistence contract.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Appends a message to the task's conversation, creating the
    /// conversation with the given owner when none exists yet.
    ///
    /// The create-or-append is atomic at the store: concurrent appends both
    /// succeed and land in arrival order. Returns the updated ordered
    /// message sequence.
    async fn append_message(
        &self,
        task_id: TaskId,
        owner: &UserId,
        message: ChatMessage,
    ) -> ConversationRepositoryResult<Vec<ChatMessage>>;

    /// Finds the conversation attached to a task.
    ///
    /// Returns `None` when no message has been appended yet.
    async fn find_by_task(
        &self,
        task_id: TaskId,
    ) -> ConversationRepositoryResult<Option<Conversation>>;

    /// Removes every conversation record attached to the task, returning
    /// the number removed.
    ///
    /// Removing a task without a conversation is not an error; the count is
    /// zero.
    async fn delete_by_task(&self, task_id: TaskId) -> ConversationRepositoryResult<u64>;
}

/// Errors returned by conversation repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ConversationRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ConversationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
