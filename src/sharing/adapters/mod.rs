//! Adapters implementing the sharing ports.
//!
//! Available adapters:
//! - [`memory::InMemoryTemplateRepository`] backed by a process-local map.

pub mod memory;
