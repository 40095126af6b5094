//! Error types for sharing and template domain validation.

use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned while constructing sharing domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SharingDomainError {
    /// The template name is empty after trimming.
    #[error("template name must not be empty")]
    EmptyTemplateName,
}

impl SharingDomainError {
    /// Returns the boundary classification for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyTemplateName => ErrorKind::Validation,
        }
    }
}
