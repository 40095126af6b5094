//! Ports exposed by the sharing module.

pub mod repository;

pub use repository::{TemplateRepository, TemplateRepositoryError, TemplateRepositoryResult};
