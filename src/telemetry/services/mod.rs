//! Services exposed by the telemetry module.

mod stats;

pub use stats::{QueueStatsError, QueueStatsResult, QueueStatsService};
