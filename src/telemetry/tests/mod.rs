//! Unit tests for queue telemetry.
