//! Conversation aggregate holding a task's ordered message thread.

use super::ChatMessage;
use crate::task::domain::{TaskId, UserId};
use serde::{Deserialize, Serialize};

/// Message thread attached to a single task.
///
/// One conversation exists per task, created lazily on the first append.
/// The owner is denormalised from the task so thread queries never join
/// back to the task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Task this thread belongs to.
    task_id: TaskId,

    /// Owner of the task, denormalised at creation.
    owner: UserId,

    /// Messages in append order.
    messages: Vec<ChatMessage>,

    /// Free-text context blob handed to the agent, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    context: Option<String>,
}

impl Conversation {
    /// Creates an empty conversation for a task.
    #[must_use]
    pub const fn new(task_id: TaskId, owner: UserId) -> Self {
        Self {
            task_id,
            owner,
            messages: Vec::new(),
            context: None,
        }
    }

    /// Attaches a free-text context blob.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Appends a message; ordering is the append order.
    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Returns the task this thread belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the denormalised owner identifier.
    #[must_use]
    pub const fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Returns the messages in append order.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Consumes the conversation and yields its messages.
    #[must_use]
    pub fn into_messages(self) -> Vec<ChatMessage> {
        self.messages
    }

    /// Returns the context blob, if any.
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}
