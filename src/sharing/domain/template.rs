//! Reusable agent configuration templates.

use super::SharingDomainError;
use crate::task::domain::{AgentConfig, AgentKind, Task, TaskName, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Suffix appended to a task name when sharing derives a template from it.
const DERIVED_NAME_SUFFIX: &str = " (Shared by User)";

/// Opaque template identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(Uuid);

impl TemplateId {
    /// Creates a new random template identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Consumes the identifier and yields the underlying UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for TemplateId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for TemplateId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated template display name.
///
/// Together with the owner it forms the template's dedup key: at most one
/// template exists per `(owner, name)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateName(String);

impl TemplateName {
    /// Creates a validated template name.
    ///
    /// # Errors
    ///
    /// Returns [`SharingDomainError::EmptyTemplateName`] when the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, SharingDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(SharingDomainError::EmptyTemplateName);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Builds the display name for a template derived from a shared task.
    #[must_use]
    pub fn derived_from_task(task_name: &TaskName) -> Self {
        Self(format!("{task_name}{DERIVED_NAME_SUFFIX}"))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TemplateName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reusable agent configuration, owned by a user or system-provided.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    id: TemplateId,
    /// `None` denotes a system template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<UserId>,
    name: TemplateName,
    #[serde(rename = "agentType")]
    agent_kind: AgentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    config: AgentConfig,
    is_public: bool,
    created_at: DateTime<Utc>,
}

/// Parameter object for creating a template explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTemplateParams {
    /// Owning user, or `None` for a system template.
    pub owner: Option<UserId>,
    /// Display name; unique per owner.
    pub name: TemplateName,
    /// Agent variety the template configures.
    pub agent_kind: AgentKind,
    /// Free-text description, if any.
    pub description: Option<String>,
    /// Configuration carried by the template.
    pub config: AgentConfig,
    /// Whether the template is publicly listed.
    pub is_public: bool,
}

impl Template {
    /// Creates a template from explicit parameters.
    #[must_use]
    pub fn new(params: NewTemplateParams, clock: &impl Clock) -> Self {
        Self {
            id: TemplateId::new(),
            owner: params.owner,
            name: params.name,
            agent_kind: params.agent_kind,
            description: params.description,
            config: params.config,
            is_public: params.is_public,
            created_at: clock.utc(),
        }
    }

    /// Derives the public template produced by sharing a task.
    ///
    /// Copies the task's agent variety and configuration under a name
    /// derived from the task name. Returns `None` when the task carries no
    /// configuration to copy.
    #[must_use]
    pub fn derived_from_shared_task(task: &Task, clock: &impl Clock) -> Option<Self> {
        let config = task.config()?.clone();
        Some(Self {
            id: TemplateId::new(),
            owner: Some(task.owner().clone()),
            name: TemplateName::derived_from_task(task.name()),
            agent_kind: task.agent_kind(),
            description: Some(format!("Shared from task '{}'", task.name())),
            config,
            is_public: true,
            created_at: clock.utc(),
        })
    }

    /// Returns the template identifier.
    #[must_use]
    pub const fn id(&self) -> TemplateId {
        self.id
    }

    /// Returns the owning user, or `None` for a system template.
    #[must_use]
    pub const fn owner(&self) -> Option<&UserId> {
        self.owner.as_ref()
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &TemplateName {
        &self.name
    }

    /// Returns the agent variety the template configures.
    #[must_use]
    pub const fn agent_kind(&self) -> AgentKind {
        self.agent_kind
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the carried configuration.
    #[must_use]
    pub const fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Returns `true` when the template is publicly listed.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        self.is_public
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
