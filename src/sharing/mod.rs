//! Task sharing and reusable templates.
//!
//! Completed tasks can be shared under an unguessable token; public shares
//! additionally derive a reusable template from the task's configuration.
//! Templates are deduplicated per owner and name, so re-sharing a task
//! replaces its token without multiplying templates. The module follows
//! hexagonal architecture:
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
