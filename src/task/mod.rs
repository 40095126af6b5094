//! Agent task lifecycle management.
//!
//! This module owns the queue's state machine: tasks are created in
//! `queued`, the worker pipeline patches them through `processing` into
//! `completed` or `failed`, and every accepted transition is announced
//! through the notification port. Reads and deletes are owner-scoped;
//! status updates trust the worker pipeline. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
