//! Domain model for per-task conversation threads.

mod conversation;
mod error;
mod message;

pub use conversation::Conversation;
pub use error::{ConversationDomainError, ParseRoleError};
pub use message::{ChatMessage, Role};
