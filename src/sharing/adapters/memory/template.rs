//! In-memory repository for template tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::sharing::{
    domain::{Template, TemplateName},
    ports::{TemplateRepository, TemplateRepositoryError, TemplateRepositoryResult},
};
use crate::task::domain::UserId;

type TemplateKey = (Option<UserId>, TemplateName);

/// Thread-safe in-memory template repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateRepository {
    state: Arc<RwLock<HashMap<TemplateKey, Template>>>,
}

impl InMemoryTemplateRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn template_key(template: &Template) -> TemplateKey {
    (template.owner().cloned(), template.name().clone())
}

#[async_trait]
impl TemplateRepository for InMemoryTemplateRepository {
    async fn store_if_absent(&self, template: &Template) -> TemplateRepositoryResult<bool> {
        let mut state = self.state.write().map_err(|err| {
            TemplateRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let key = template_key(template);
        if state.contains_key(&key) {
            return Ok(false);
        }
        state.insert(key, template.clone());
        Ok(true)
    }

    async fn find_by_owner_and_name(
        &self,
        owner: Option<&UserId>,
        name: &TemplateName,
    ) -> TemplateRepositoryResult<Option<Template>> {
        let state = self.state.read().map_err(|err| {
            TemplateRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let key = (owner.cloned(), name.clone());
        Ok(state.get(&key).cloned())
    }

    async fn list_for_owner(&self, owner: &UserId) -> TemplateRepositoryResult<Vec<Template>> {
        let state = self.state.read().map_err(|err| {
            TemplateRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let templates = state
            .values()
            .filter(|template| template.owner() == Some(owner))
            .cloned()
            .collect();
        Ok(templates)
    }

    async fn list_public(&self) -> TemplateRepositoryResult<Vec<Template>> {
        let state = self.state.read().map_err(|err| {
            TemplateRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let templates = state
            .values()
            .filter(|template| template.is_public())
            .cloned()
            .collect();
        Ok(templates)
    }
}
