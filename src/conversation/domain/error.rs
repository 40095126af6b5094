//! Error types for conversation domain validation.

use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned while constructing conversation domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversationDomainError {
    /// The message content is blank.
    #[error("message content must not be blank")]
    EmptyMessageContent,
}

impl ConversationDomainError {
    /// Returns the boundary classification for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyMessageContent => ErrorKind::Validation,
        }
    }
}

/// Error returned while parsing message roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown message role: {0}")]
pub struct ParseRoleError(pub String);
