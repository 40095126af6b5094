//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod notifier;
pub mod repository;

pub use notifier::{TaskEventNotifier, TaskStatusEvent};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
