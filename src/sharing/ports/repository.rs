//! Port for template persistence.

use crate::sharing::domain::{Template, TemplateName};
use crate::task::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;

/// Result alias for template repository operations.
pub type TemplateRepositoryResult<T> = Result<T, TemplateRepositoryError>;

/// Persistence port for agent templates.
///
/// Templates are keyed by owner and name; a `None` owner denotes a
/// system template. Listing operations return templates in no
/// particular order.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Stores the template unless one with the same owner and name
    /// already exists.
    ///
    /// Returns `true` when the template was inserted and `false` when
    /// an existing template was left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateRepositoryError::Persistence`] when the
    /// backing store fails.
    async fn store_if_absent(&self, template: &Template) -> TemplateRepositoryResult<bool>;

    /// Finds a template by its owner and name.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateRepositoryError::Persistence`] when the
    /// backing store fails.
    async fn find_by_owner_and_name(
        &self,
        owner: Option<&UserId>,
        name: &TemplateName,
    ) -> TemplateRepositoryResult<Option<Template>>;

    /// Lists the templates owned by the given user.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateRepositoryError::Persistence`] when the
    /// backing store fails.
    async fn list_for_owner(&self, owner: &UserId) -> TemplateRepositoryResult<Vec<Template>>;

    /// Lists all public templates.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateRepositoryError::Persistence`] when the
    /// backing store fails.
    async fn list_public(&self) -> TemplateRepositoryResult<Vec<Template>>;
}

/// Errors surfaced by template repositories.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TemplateRepositoryError {
    /// The backing store failed.
    #[error("template persistence failed: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TemplateRepositoryError {
    /// Wraps a backend failure in [`TemplateRepositoryError::Persistence`].
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
