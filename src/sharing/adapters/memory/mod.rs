//! In-memory adapters for the sharing module.

mod template;

pub use template::InMemoryTemplateRepository;
