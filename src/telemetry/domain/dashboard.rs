//! Combined dashboard snapshot and its boundary envelope.

use super::{QueueHealth, WindowStats};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Stats for the two standard dashboard windows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsBundle {
    hourly: WindowStats,
    daily: WindowStats,
}

impl StatsBundle {
    /// Bundles hourly and daily window stats.
    #[must_use]
    pub const fn new(hourly: WindowStats, daily: WindowStats) -> Self {
        Self { hourly, daily }
    }

    /// Stats over the trailing hour.
    #[must_use]
    pub const fn hourly(&self) -> &WindowStats {
        &self.hourly
    }

    /// Stats over the trailing twenty-four hours.
    #[must_use]
    pub const fn daily(&self) -> &WindowStats {
        &self.daily
    }
}

/// One consistent view of queue health and throughput.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    health: QueueHealth,
    stats: StatsBundle,
    timestamp: DateTime<Utc>,
}

impl DashboardSnapshot {
    /// Combines health and stats taken at the same instant.
    #[must_use]
    pub const fn new(health: QueueHealth, stats: StatsBundle, timestamp: DateTime<Utc>) -> Self {
        Self {
            health,
            stats,
            timestamp,
        }
    }

    /// Returns the health report.
    #[must_use]
    pub const fn health(&self) -> &QueueHealth {
        &self.health
    }

    /// Returns the windowed stats.
    #[must_use]
    pub const fn stats(&self) -> &StatsBundle {
        &self.stats
    }

    /// Returns the instant the snapshot was assembled.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Boundary envelope for a dashboard response: `{ success, data }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardResponse {
    success: bool,
    data: DashboardSnapshot,
}

impl DashboardResponse {
    /// Wraps a snapshot in the success envelope.
    #[must_use]
    pub const fn new(data: DashboardSnapshot) -> Self {
        Self {
            success: true,
            data,
        }
    }

    /// Returns the wrapped snapshot.
    #[must_use]
    pub const fn data(&self) -> &DashboardSnapshot {
        &self.data
    }
}
