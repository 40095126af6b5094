//! Domain model for queue observability.

mod dashboard;
mod health;
mod stats;

pub use dashboard::{DashboardResponse, DashboardSnapshot, StatsBundle};
pub use health::{HealthMetrics, HealthStatus, QueueHealth, QueueHealthPolicy};
pub use stats::{StatsWindow, WindowStats};
