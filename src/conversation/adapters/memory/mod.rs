//! In-memory adapter implementations for testing.

mod conversation;

pub use conversation::InMemoryConversationRepository;
