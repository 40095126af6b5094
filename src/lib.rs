//! Satchel: a task queue for course-scoped AI agents.
//!
//! This crate provides the core functionality for running agent work as
//! queued tasks: owners submit work, the worker pipeline reports progress
//! and outcomes through a strict status state machine, conversations attach
//! follow-up exchanges to tasks, completed tasks can be shared and mined
//! for reusable templates, and the telemetry layer folds the store into
//! health and throughput views.
//!
//! # Architecture
//!
//! Satchel follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (stores, notifiers)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle, the status state machine, and notifications
//! - [`conversation`]: Per-task message threads
//! - [`sharing`]: Share links and reusable agent templates
//! - [`telemetry`]: Queue health, throughput stats, and the dashboard
//! - [`error`]: Boundary error taxonomy shared by every service

pub mod conversation;
pub mod error;
pub mod sharing;
pub mod task;
pub mod telemetry;
