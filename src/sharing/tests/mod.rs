//! Unit tests for the sharing module.
//!
//! Tests are organised by concern: template and grant domain types, and
//! the share/template service flows over the in-memory adapters.
