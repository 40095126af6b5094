//! References to uploaded files attached to a task.

use serde::{Deserialize, Serialize};

/// Pointer to a file held by the upload store.
///
/// Only the identifier is required; name, media type, and size are hints
/// forwarded when the uploader supplied them. The queue never dereferences
/// these, they travel with the task so the executing agent can fetch the
/// content itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRef {
    file_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
}

impl FileRef {
    /// Creates a reference carrying only the store identifier.
    #[must_use]
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            file_name: None,
            mime_type: None,
            size: None,
        }
    }

    /// Attaches the original file name.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Attaches the declared media type.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Attaches the size in bytes.
    #[must_use]
    pub const fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Identifier assigned by the upload store.
    #[must_use]
    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    /// Original file name, when the uploader supplied one.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Declared media type, when known.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Size in bytes, when known.
    #[must_use]
    pub const fn size(&self) -> Option<u64> {
        self.size
    }
}
