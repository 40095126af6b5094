//! Boundary error taxonomy shared by every service.
//!
//! The HTTP/API layer in front of this crate maps service errors onto
//! status classes without string-matching: each service error type exposes
//! a `kind()` method returning one of these variants.

use std::fmt;

/// Classification of a service error for the caller-facing boundary.
///
/// The variants correspond to the status classes the boundary layer is
/// expected to surface: 404 for [`NotFound`](Self::NotFound), 401/403 for
/// [`Unauthorized`](Self::Unauthorized), 409 for
/// [`InvalidState`](Self::InvalidState), 400 for
/// [`Validation`](Self::Validation), and 500 for
/// [`Internal`](Self::Internal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced task, conversation, or share link does not exist.
    NotFound,
    /// The requester does not own the referenced record.
    Unauthorized,
    /// The operation violates a state invariant, such as sharing a task
    /// before completion or transitioning out of a terminal status.
    InvalidState,
    /// The input payload is malformed or incomplete.
    Validation,
    /// The backing store or another collaborator failed.
    Internal,
}

impl ErrorKind {
    /// Returns the canonical lowercase label for the classification.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Unauthorized => "unauthorized",
            Self::InvalidState => "invalid_state",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
