//! Adapters implementing the task module's ports.
//!
//! Adapters handle all infrastructure concerns while the domain remains
//! pure.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryTaskRepository`]: thread-safe in-memory storage
//! - [`memory::RecordingTaskEventNotifier`]: captures emitted events for
//!   assertions
//! - [`notify::TracingTaskEventNotifier`]: logs lifecycle events through
//!   `tracing`

pub mod memory;
pub mod notify;
