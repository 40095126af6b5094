//! Unit tests for the conversation module.
//!
//! Tests are organised by concern: message and thread domain types, and
//! service orchestration over the in-memory adapters.
