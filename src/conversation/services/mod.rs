//! Application services for conversation orchestration.

mod messaging;

pub use messaging::{ConversationService, ConversationServiceError, ConversationServiceResult};
