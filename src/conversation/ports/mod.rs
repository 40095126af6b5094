//! Port contracts for conversation management.

pub mod repository;

pub use repository::{
    ConversationRepository, ConversationRepositoryError, ConversationRepositoryResult,
};
