//! Per-task conversation threads.
//!
//! Each task carries at most one conversation: an append-only, ordered
//! message thread between the task owner and the executing agent. Appends
//! are gated on task existence and ownership; reads return an empty
//! sequence rather than failing when no thread exists. The module follows
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
