//! Service layer for queue stats, health, and the dashboard.

use crate::error::ErrorKind;
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use crate::telemetry::domain::{
    DashboardSnapshot, QueueHealth, QueueHealthPolicy, StatsBundle, StatsWindow, WindowStats,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for queue telemetry.
#[derive(Debug, Error)]
pub enum QueueStatsError {
    /// Task store scan failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl QueueStatsError {
    /// Returns the boundary classification for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Repository(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for queue telemetry operations.
pub type QueueStatsResult<T> = Result<T, QueueStatsError>;

/// Read-only aggregation service over the task store.
///
/// Every operation folds a single store scan through pure domain
/// functions, so a task mutated concurrently lands in exactly one state
/// bucket per invocation. Aggregation never fails on missing telemetry
/// fields.
#[derive(Clone)]
pub struct QueueStatsService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    policy: QueueHealthPolicy,
}

impl<R, C> QueueStatsService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new stats service with the given health policy.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, policy: QueueHealthPolicy) -> Self {
        Self {
            repository,
            clock,
            policy,
        }
    }

    /// Computes throughput stats for the window ending at `as_of`.
    ///
    /// Idempotent: repeated calls over an unchanged store return equal
    /// stats.
    ///
    /// # Errors
    ///
    /// Returns [`QueueStatsError::Repository`] when the store scan fails.
    pub async fn window_stats(
        &self,
        window: StatsWindow,
        as_of: DateTime<Utc>,
    ) -> QueueStatsResult<WindowStats> {
        let tasks = self.repository.scan().await?;
        Ok(WindowStats::collect(&tasks, window, as_of))
    }

    /// Classifies queue health at `as_of`.
    ///
    /// # Errors
    ///
    /// Returns [`QueueStatsError::Repository`] when the store scan fails.
    pub async fn health(&self, as_of: DateTime<Utc>) -> QueueStatsResult<QueueHealth> {
        let tasks = self.repository.scan().await?;
        Ok(QueueHealth::evaluate(&tasks, &self.policy, as_of))
    }

    /// Assembles the dashboard snapshot at the current instant.
    ///
    /// Health and both stats windows fold the same scan, so the three
    /// views agree on every task's state.
    ///
    /// # Errors
    ///
    /// Returns [`QueueStatsError::Repository`] when the store scan fails.
    pub async fn dashboard(&self) -> QueueStatsResult<DashboardSnapshot> {
        let as_of = self.clock.utc();
        let tasks = self.repository.scan().await?;
        let health = QueueHealth::evaluate(&tasks, &self.policy, as_of);
        let stats = StatsBundle::new(
            WindowStats::collect(&tasks, StatsWindow::Hourly, as_of),
            WindowStats::collect(&tasks, StatsWindow::Daily, as_of),
        );
        Ok(DashboardSnapshot::new(health, stats, as_of))
    }
}
