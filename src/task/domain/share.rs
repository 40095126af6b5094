//! Share tokens and the settings attached to a shared task.

use super::{TaskId, UserId};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use uuid::Uuid;

/// Unguessable token granting read access to a shared task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareToken(String);

impl ShareToken {
    /// Generates a fresh token for `task_id` minted at `at`.
    ///
    /// The token is the hex SHA-256 digest of the task id, the share
    /// instant, and a fresh UUID, so it cannot be derived from the task id
    /// alone.
    #[must_use]
    pub fn generate(task_id: TaskId, at: DateTime<Utc>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(task_id.as_ref().as_bytes());
        hasher.update(at.to_rfc3339_opts(SecondsFormat::Nanos, true).as_bytes());
        hasher.update(Uuid::new_v4().as_bytes());
        let digest = hasher.finalize();
        Self(format!("{digest:x}"))
    }

    /// Wraps a token value loaded from storage.
    #[must_use]
    pub fn from_string(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ShareToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShareToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Sharing configuration attached to a completed task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareSettings {
    token: ShareToken,
    is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    allow_comments: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    shared_with: Option<Vec<UserId>>,
    shared_by: UserId,
    created_at: DateTime<Utc>,
}

impl ShareSettings {
    /// Creates settings for a share minted by `shared_by` at `created_at`.
    #[must_use]
    pub const fn new(
        token: ShareToken,
        is_public: bool,
        shared_by: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token,
            is_public,
            allow_comments: None,
            expires_at: None,
            shared_with: None,
            shared_by,
            created_at,
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
    pub fn with_shared_with(mut self, shared_with: Vec<UserId>) -> Self {
        self.shared_with = Some(shared_with);
        self
    }

    /// Token minted for this share.
    #[must_use]
    pub const fn token(&self) -> &ShareToken {
        &self.token
    }

    /// Whether the share is publicly visible.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        self.is_public
    }

    /// Whether viewers may attach comments, when specified.
    #[must_use]
    pub const fn allow_comments(&self) -> Option<bool> {
        self.allow_comments
    }

    /// Expiry instant, when the share is time-limited.
    #[must_use]
    pub const fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Explicit recipient list, when the share is restricted.
    #[must_use]
    pub fn shared_with(&self) -> Option<&[UserId]> {
        self.shared_with.as_deref()
    }

    /// User who minted the share.
    #[must_use]
    pub const fn shared_by(&self) -> &UserId {
        &self.shared_by
    }

    /// Instant the share was minted.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns `true` when the share has an expiry in the past at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}
