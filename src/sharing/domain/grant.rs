//! Share grants returned to the boundary.

use crate::task::domain::ShareToken;
use serde::Serialize;

/// Token and path granted by a successful share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareGrant {
    share_token: ShareToken,
    share_url: String,
}

impl ShareGrant {
    /// Creates a grant for the given token, deriving the share path.
    #[must_use]
    pub fn new(share_token: ShareToken) -> Self {
        let share_url = format!("/shared/{share_token}");
        Self {
            share_token,
            share_url,
        }
    }

    /// Returns the granted token.
    #[must_use]
    pub const fn share_token(&self) -> &ShareToken {
        &self.share_token
    }

    /// Returns the path the shared task is served under.
    #[must_use]
    pub fn share_url(&self) -> &str {
        &self.share_url
    }
}

/// Boundary envelope for a share response:
/// `{ success, shareToken, shareUrl }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareResponse {
    success: bool,
    #[serde(flatten)]
    grant: ShareGrant,
}

impl ShareResponse {
    /// Wraps a grant in the success envelope.
    #[must_use]
    pub const fn new(grant: ShareGrant) -> Self {
        Self {
            success: true,
            grant,
        }
    }

    /// Returns the wrapped grant.
    #[must_use]
    pub const fn grant(&self) -> &ShareGrant {
        &self.grant
    }
}
