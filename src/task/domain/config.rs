//! Opaque per-task agent configuration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form configuration handed to the agent that runs a task.
///
/// The queue stores and returns the map verbatim; keys are interpreted by
/// the agent implementation, never by the queue itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentConfig(Map<String, Value>);

impl AgentConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wraps an existing JSON object.
    #[must_use]
    pub const fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Returns the value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Stores `value` under `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Returns `true` when no keys are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of configured keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Borrows the underlying JSON object.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the wrapper and yields the underlying JSON object.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for AgentConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
