//! Completion payloads reported by the worker pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Output produced by a completed task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    content: String,
    format: String,
    #[serde(default)]
    metadata: Map<String, Value>,
}

impl TaskResult {
    /// Creates a result payload with empty metadata.
    #[must_use]
    pub fn new(content: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            format: format.into(),
            metadata: Map::new(),
        }
    }

    /// Attaches producer-defined metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Produced content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Content format label, for example `md`.
    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Producer-defined metadata, passed through untouched.
    #[must_use]
    pub const fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }
}

/// Resource consumption recorded for a completed task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUsage {
    tokens_used: u64,
    processing_time: u64,
    cost: f64,
}

impl TaskUsage {
    /// Creates a usage record. `processing_time` is in milliseconds.
    #[must_use]
    pub const fn new(tokens_used: u64, processing_time: u64, cost: f64) -> Self {
        Self {
            tokens_used,
            processing_time,
            cost,
        }
    }

    /// Tokens consumed by the agent run.
    #[must_use]
    pub const fn tokens_used(&self) -> u64 {
        self.tokens_used
    }

    /// Wall-clock processing time in milliseconds.
    #[must_use]
    pub const fn processing_time(&self) -> u64 {
        self.processing_time
    }

    /// Monetary cost of the run.
    #[must_use]
    pub const fn cost(&self) -> f64 {
        self.cost
    }
}
