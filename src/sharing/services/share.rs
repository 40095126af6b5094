//! Service layer for share links, token resolution, and templates.

use crate::error::ErrorKind;
use crate::sharing::{
    domain::{
        NewTemplateParams, ShareGrant, ShareSettings, ShareToken, SharingDomainError, Template,
        TemplateName,
    },
    ports::{TemplateRepository, TemplateRepositoryError},
};
use crate::task::{
    domain::{AgentConfig, AgentKind, Task, TaskDomainError, TaskId, UserId},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Sharing options supplied when a task owner mints a share link.
///
/// Mirrors the boundary shape `{ isPublic, allowComments, expiresAt,
/// sharedWith }`; requester identity arrives separately from the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    allow_comments: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    shared_with: Option<Vec<String>>,
}

impl ShareRequest {
    /// Creates a request with the given visibility and no extras.
    #[must_use]
    pub const fn new(is_public: bool) -> Self {
        Self {
            is_public,
            allow_comments: None,
            expires_at: None,
            shared_with: None,
        }
    }

    /// Sets whether viewers may attach comments.
    #[must_use]
    pub const fn with_allow_comments(mut self, allow_comments: bool) -> Self {
        self.allow_comments = Some(allow_comments);
        self
    }

    /// Sets the instant after which the share link stops resolving.
    #[must_use]
    pub const fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Restricts the share to an explicit recipient list.
    #[must_use]
    pub fn with_shared_with(mut self, shared_with: impl IntoIterator<Item = String>) -> Self {
        self.shared_with = Some(shared_with.into_iter().collect());
        self
    }
}

/// Payload for creating a template explicitly rather than by sharing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
    name: String,
    #[serde(rename = "agentType")]
    agent_kind: AgentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    config: AgentConfig,
    is_public: bool,
}

impl CreateTemplateRequest {
    /// Creates a system-owned template request with no description.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        agent_kind: AgentKind,
        config: AgentConfig,
        is_public: bool,
    ) -> Self {
        Self {
            owner: None,
            name: name.into(),
            agent_kind,
            description: None,
            config,
            is_public,
        }
    }

    /// Assigns the template to an owning user.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Service-level errors for sharing operations.
#[derive(Debug, Error)]
pub enum SharingServiceError {
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// No live share matches the presented token.
    ///
    /// Unknown and expired tokens are indistinguishable to callers.
    #[error("share link not found")]
    ShareLinkNotFound,

    /// The requester does not own the task.
    #[error("user {requester} does not own task {task_id}")]
    Unauthorized {
        /// Task the requester tried to share.
        task_id: TaskId,
        /// Requesting user.
        requester: UserId,
    },

    /// A template with the same owner and name already exists.
    #[error("template '{name}' already exists for this owner")]
    DuplicateTemplate {
        /// Name that collided.
        name: TemplateName,
    },

    /// Template validation failed.
    #[error(transparent)]
    Domain(#[from] SharingDomainError),

    /// Identity validation or share state enforcement failed.
    #[error(transparent)]
    Task(#[from] TaskDomainError),

    /// Task store operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Template store operation failed.
    #[error(transparent)]
    Templates(#[from] TemplateRepositoryError),
}

impl SharingServiceError {
    /// Returns the boundary classification for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_)
            | Self::ShareLinkNotFound
            | Self::Repository(TaskRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::DuplicateTemplate { .. } => ErrorKind::InvalidState,
            Self::Domain(err) => err.kind(),
            Self::Task(err) => err.kind(),
            Self::Repository(_) | Self::Templates(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for sharing service operations.
pub type SharingResult<T> = Result<T, SharingServiceError>;

/// Sharing orchestration service.
///
/// Mints share links on completed tasks, resolves tokens back to tasks,
/// and manages the template catalogue that public shares feed.
#[derive(Clone)]
pub struct SharingService<T, P, C>
where
    T: TaskRepository,
    P: TemplateRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    templates: Arc<P>,
    clock: Arc<C>,
}

impl<T, P, C> SharingService<T, P, C>
where
    T: TaskRepository,
    P: TemplateRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new sharing service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, templates: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            templates,
            clock,
        }
    }

    /// Shares a completed task, minting a fresh token and, for public
    /// shares, deriving a template from the task's configuration.
    ///
    /// Re-sharing replaces the previous token and settings; the derived
    /// template is keyed by owner and name, so repeating the share never
    /// duplicates it.
    ///
    /// # Errors
    ///
    /// Returns [`SharingServiceError::NotFound`] when the task does not
    /// exist, [`SharingServiceError::Unauthorized`] when the requester does
    /// not own it, and [`SharingServiceError::Task`] when the task is not
    /// completed.
    pub async fn share(
        &self,
        task_id: TaskId,
        requester: &str,
        request: ShareRequest,
    ) -> SharingResult<ShareGrant> {
        let requester_id = UserId::new(requester)?;
        let mut task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(SharingServiceError::NotFound(task_id))?;
        if task.owner() != &requester_id {
            return Err(SharingServiceError::Unauthorized {
                task_id,
                requester: requester_id,
            });
        }

        let ShareRequest {
            is_public,
            allow_comments,
            expires_at,
            shared_with,
        } = request;
        let recipients = shared_with
            .map(|entries| {
                entries
                    .into_iter()
                    .map(UserId::new)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        let now = self.clock.utc();
        let token = ShareToken::generate(task.id(), now);
        let mut settings = ShareSettings::new(token.clone(), is_public, requester_id, now);
        if let Some(allow_comments) = allow_comments {
            settings = settings.with_allow_comments(allow_comments);
        }
        if let Some(expires_at) = expires_at {
            settings = settings.with_expires_at(expires_at);
        }
        if let Some(recipients) = recipients {
            settings = settings.with_shared_with(recipients);
        }

        task.attach_share(settings, &*self.clock)?;
        self.tasks.update(&task).await?;

        if is_public && let Some(template) = Template::derived_from_shared_task(&task, &*self.clock)
        {
            self.templates.store_if_absent(&template).await?;
        }
        Ok(ShareGrant::new(token))
    }

    /// Resolves a share token to the shared task.
    ///
    /// # Errors
    ///
    /// Returns [`SharingServiceError::ShareLinkNotFound`] when no task
    /// carries the token or the share has expired.
    pub async fn resolve_share_token(&self, token: &ShareToken) -> SharingResult<Task> {
        let task = self
            .tasks
            .find_by_share_token(token)
            .await?
            .ok_or(SharingServiceError::ShareLinkNotFound)?;
        let settings = task
            .share()
            .ok_or(SharingServiceError::ShareLinkNotFound)?;
        if settings.is_expired(self.clock.utc()) {
            return Err(SharingServiceError::ShareLinkNotFound);
        }
        Ok(task)
    }

    /// Creates a template from an explicit request.
    ///
    /// # Errors
    ///
    /// Returns [`SharingServiceError::DuplicateTemplate`] when the owner
    /// already has a template with the same name and
    /// [`SharingServiceError::Domain`] when the name fails validation.
    pub async fn create_template(&self, request: CreateTemplateRequest) -> SharingResult<Template> {
        let CreateTemplateRequest {
            owner,
            name,
            agent_kind,
            description,
            config,
            is_public,
        } = request;
        let params = NewTemplateParams {
            owner: owner.map(UserId::new).transpose()?,
            name: TemplateName::new(name)?,
            agent_kind,
            description,
            config,
            is_public,
        };
        let template = Template::new(params, &*self.clock);
        let inserted = self.templates.store_if_absent(&template).await?;
        if !inserted {
            return Err(SharingServiceError::DuplicateTemplate {
                name: template.name().clone(),
            });
        }
        Ok(template)
    }

    /// Lists the templates owned by `owner`, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`SharingServiceError::Task`] when the owner id fails
    /// validation and [`SharingServiceError::Templates`] when the store
    /// lookup fails.
    pub async fn list_templates(&self, owner: &str) -> SharingResult<Vec<Template>> {
        let owner_id = UserId::new(owner)?;
        let mut templates = self.templates.list_for_owner(&owner_id).await?;
        sort_by_name(&mut templates);
        Ok(templates)
    }

    /// Lists all public templates, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`SharingServiceError::Templates`] when the store lookup
    /// fails.
    pub async fn list_public_templates(&self) -> SharingResult<Vec<Template>> {
        let mut templates = self.templates.list_public().await?;
        sort_by_name(&mut templates);
        Ok(templates)
    }
}

/// Orders templates by display name for stable listings.
fn sort_by_name(templates: &mut [Template]) {
    templates.sort_by(|a, b| a.name().as_str().cmp(b.name().as_str()));
}
