//! In-memory adapter implementations for testing.
//!
//! These adapters provide simple, thread-safe implementations suitable for
//! exercising the services without external store dependencies.

mod notifier;
mod task;

pub use notifier::RecordingTaskEventNotifier;
pub use task::InMemoryTaskRepository;
