//! Queue observability: throughput stats, health, and the dashboard.
//!
//! Aggregation is observational: services scan the task store at query
//! time and fold the snapshot through pure domain functions. Nothing here
//! writes; a dashboard request cannot perturb the queue it reports on.
//!
//! - Domain types in [`domain`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
