//! Agent varieties the queue dispatches work to.

use super::ParseAgentKindError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Variety of agent a task is executed by.
///
/// The queue treats the kind as routing and grouping metadata only; the
/// worker pipeline owns what each kind actually does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentKind {
    /// Condenses uploaded material into structured notes.
    NoteTaker,
    /// Gathers and synthesises supplementary sources.
    Researcher,
    /// Drives an interactive revision dialogue.
    StudyBuddy,
    /// Drafts an assignment from a brief and source files.
    Assignment,
}

impl AgentKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoteTaker => "note-taker",
            Self::Researcher => "researcher",
            Self::StudyBuddy => "study-buddy",
            Self::Assignment => "assignment",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AgentKind {
    type Error = ParseAgentKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "note-taker" => Ok(Self::NoteTaker),
            "researcher" => Ok(Self::Researcher),
            "study-buddy" => Ok(Self::StudyBuddy),
            "assignment" => Ok(Self::Assignment),
            _ => Err(ParseAgentKindError(value.to_owned())),
        }
    }
}
