//! Unit tests for the task module.
//!
//! Tests are organised by concern: identity and payload domain types, the
//! status state machine and update validation, service orchestration over
//! the in-memory adapters, and store failure propagation through the
//! service layer.

mod repository_failure_tests;
mod service_tests;
