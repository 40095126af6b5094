//! Domain model for agent task lifecycle management.
//!
//! The task domain models submission, the queued-to-terminal status machine,
//! worker-reported progress and completion payloads, and share settings,
//! while keeping all infrastructure concerns outside of the domain boundary.

mod agent;
mod config;
mod error;
mod file;
mod ids;
mod outcome;
mod share;
mod status;
mod task;

pub use agent::AgentKind;
pub use config::AgentConfig;
pub use error::{ParseAgentKindError, ParseTaskStatusError, TaskDomainError};
pub use file::FileRef;
pub use ids::{CourseId, Progress, TaskId, TaskName, UserId};
pub use outcome::{TaskResult, TaskUsage};
pub use share::{ShareSettings, ShareToken};
pub use status::TaskStatus;
pub use task::{NewTaskParams, PersistedTaskData, StatusUpdate, Task};
