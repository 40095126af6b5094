//! In-memory repository for conversation threads.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::conversation::{
    domain::{ChatMessage, Conversation},
    ports::{ConversationRepository, ConversationRepositoryError, ConversationRepositoryResult},
};
use crate::task::domain::{TaskId, UserId};

/// Thread-safe in-memory conversation repository.
///
/// The write lock serialises create-or-append, which gives the arrival
/// ordering the port contract asks of the store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationRepository {
    state: Arc<RwLock<HashMap<TaskId, Conversation>>>,
}

impl InMemoryConversationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn append_message(
        &self,
        task_id: TaskId,
        owner: &UserId,
        message: ChatMessage,
    ) -> ConversationRepositoryResult<Vec<ChatMessage>> {
        let mut state = self.state.write().map_err(|err| {
            ConversationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let conversation = state
            .entry(task_id)
            .or_insert_with(|| Conversation::new(task_id, owner.clone()));
        conversation.append(message);
        Ok(conversation.messages().to_vec())
    }

    async fn find_by_task(
        &self,
        task_id: TaskId,
    ) -> ConversationRepositoryResult<Option<Conversation>> {
        let state = self.state.read().map_err(|err| {
            ConversationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&task_id).cloned())
    }

    async fn delete_by_task(&self, task_id: TaskId) -> ConversationRepositoryResult<u64> {
        let mut state = self.state.write().map_err(|err| {
            ConversationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(u64::from(state.remove(&task_id).is_some()))
    }
}
