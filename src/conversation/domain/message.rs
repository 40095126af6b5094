//! Chat messages exchanged within a task's conversation.

use super::{ConversationDomainError, ParseRoleError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Message written by the task owner.
    User,
    /// Message produced by the executing agent.
    Assistant,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// A single message within a task's conversation.
///
/// Messages are immutable once appended; ordering is the append order and
/// carries the semantic order of the exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    role: Role,
    content: String,
    created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Creates a message with a server-assigned timestamp.
    ///
    /// Content is stored verbatim; surrounding whitespace is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`ConversationDomainError::EmptyMessageContent`] when the
    /// content is blank after trimming.
    pub fn new(
        role: Role,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, ConversationDomainError> {
        let text = content.into();
        if text.trim().is_empty() {
            return Err(ConversationDomainError::EmptyMessageContent);
        }
        Ok(Self {
            role,
            content: text,
            created_at: clock.utc(),
        })
    }

    /// Returns the message source.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the message text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the server-assigned creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
