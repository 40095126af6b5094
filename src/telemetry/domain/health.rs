//! Queue health classification from store snapshots.

use super::stats::mean;
use crate::task::domain::{Task, TaskStatus};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::fmt;

/// Overall queue health classification.
///
/// Ordered from best to worst, so the worst crossed threshold can be
/// selected with `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// No threshold crossed.
    Healthy,
    /// A degraded threshold crossed.
    Degraded,
    /// An unhealthy threshold crossed.
    Unhealthy,
}

impl HealthStatus {
    /// Returns the status as `str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
            Self::Unhealthy => "unhealthy",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Thresholds governing health classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueHealthPolicy {
    delayed_after: Option<Duration>,
    degraded_failure_rate: f64,
    unhealthy_failure_rate: f64,
    degraded_delayed_count: u64,
    unhealthy_delayed_count: u64,
    processing_window: Duration,
}

impl QueueHealthPolicy {
    /// Creates the default policy.
    ///
    /// Queued tasks are never considered delayed until
    /// [`with_delayed_after`](Self::with_delayed_after) sets an age
    /// threshold.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delayed_after: None,
            degraded_failure_rate: 0.10,
            unhealthy_failure_rate: 0.25,
            degraded_delayed_count: 5,
            unhealthy_delayed_count: 20,
            processing_window: Duration::hours(24),
        }
    }

    /// Sets the queued age beyond which a task counts as delayed.
    #[must_use]
    pub const fn with_delayed_after(mut self, delayed_after: Duration) -> Self {
        self.delayed_after = Some(delayed_after);
        self
    }

    /// Sets the degraded and unhealthy failure-rate thresholds.
    #[must_use]
    pub const fn with_failure_thresholds(mut self, degraded: f64, unhealthy: f64) -> Self {
        self.degraded_failure_rate = degraded;
        self.unhealthy_failure_rate = unhealthy;
        self
    }

    /// Sets the degraded and unhealthy delayed-count thresholds.
    #[must_use]
    pub const fn with_delayed_thresholds(mut self, degraded: u64, unhealthy: u64) -> Self {
        self.degraded_delayed_count = degraded;
        self.unhealthy_delayed_count = unhealthy;
        self
    }

    /// Sets the window feeding the average processing-time metric.
    #[must_use]
    pub const fn with_processing_window(mut self, processing_window: Duration) -> Self {
        self.processing_window = processing_window;
        self
    }

    /// Queued age beyond which a task counts as delayed, when set.
    #[must_use]
    pub const fn delayed_after(&self) -> Option<Duration> {
        self.delayed_after
    }

    /// Failure rate at or above which the queue is degraded.
    #[must_use]
    pub const fn degraded_failure_rate(&self) -> f64 {
        self.degraded_failure_rate
    }

    /// Failure rate at or above which the queue is unhealthy.
    #[must_use]
    pub const fn unhealthy_failure_rate(&self) -> f64 {
        self.unhealthy_failure_rate
    }

    /// Delayed count at or above which the queue is degraded.
    #[must_use]
    pub const fn degraded_delayed_count(&self) -> u64 {
        self.degraded_delayed_count
    }

    /// Delayed count at or above which the queue is unhealthy.
    #[must_use]
    pub const fn unhealthy_delayed_count(&self) -> u64 {
        self.unhealthy_delayed_count
    }

    /// Window feeding the average processing-time metric.
    #[must_use]
    pub const fn processing_window(&self) -> Duration {
        self.processing_window
    }
}

impl Default for QueueHealthPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Queue gauges and terminal counters backing a health report.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    processed: u64,
    failed: u64,
    active: u64,
    waiting: u64,
    delayed: u64,
    average_processing_time: f64,
}

impl HealthMetrics {
    /// Folds a store snapshot into gauges at `as_of`.
    ///
    /// `processed` and `failed` count terminal tasks store-wide; `active`
    /// and `waiting` are instantaneous status counts; `delayed` counts
    /// queued tasks older than the policy threshold, zero when no
    /// threshold is set. The processing-time mean covers tasks completed
    /// within the policy's processing window.
    #[must_use]
    pub fn collect(tasks: &[Task], policy: &QueueHealthPolicy, as_of: DateTime<Utc>) -> Self {
        let window_opens = as_of - policy.processing_window;
        let mut metrics = Self::default();
        let mut time_sum = 0_u64;
        let mut timed = 0_u64;
        for task in tasks {
            match task.status() {
                TaskStatus::Queued => {
                    metrics.waiting += 1;
                    if let Some(threshold) = policy.delayed_after
                        && as_of.signed_duration_since(task.created_at()) > threshold
                    {
                        metrics.delayed += 1;
                    }
                }
                TaskStatus::Processing => metrics.active += 1,
                TaskStatus::Completed => {
                    metrics.processed += 1;
                    if let Some(usage) = task.usage()
                        && task
                            .terminal_at()
                            .is_some_and(|instant| instant > window_opens && instant <= as_of)
                    {
                        time_sum += usage.processing_time();
                        timed += 1;
                    }
                }
                TaskStatus::Failed => metrics.failed += 1,
            }
        }
        metrics.average_processing_time = mean(time_sum, timed);
        metrics
    }

    /// Count of completed tasks store-wide.
    #[must_use]
    pub const fn processed(&self) -> u64 {
        self.processed
    }

    /// Count of failed tasks store-wide.
    #[must_use]
    pub const fn failed(&self) -> u64 {
        self.failed
    }

    /// Count of tasks currently processing.
    #[must_use]
    pub const fn active(&self) -> u64 {
        self.active
    }

    /// Count of tasks currently queued.
    #[must_use]
    pub const fn waiting(&self) -> u64 {
        self.waiting
    }

    /// Count of queued tasks older than the policy threshold.
    #[must_use]
    pub const fn delayed(&self) -> u64 {
        self.delayed
    }

    /// Mean processing time in milliseconds over the processing window.
    #[must_use]
    pub const fn average_processing_time(&self) -> f64 {
        self.average_processing_time
    }
}

/// Health report for the queue at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueHealth {
    status: HealthStatus,
    metrics: HealthMetrics,
    warnings: Vec<String>,
    timestamp: DateTime<Utc>,
}

impl QueueHealth {
    /// Classifies queue health from a store snapshot at `as_of`.
    ///
    /// The status is the worst threshold crossed; each crossed threshold
    /// contributes a warning. An empty store is healthy.
    #[must_use]
    pub fn evaluate(tasks: &[Task], policy: &QueueHealthPolicy, as_of: DateTime<Utc>) -> Self {
        let metrics = HealthMetrics::collect(tasks, policy, as_of);
        let mut status = HealthStatus::Healthy;
        let mut warnings = Vec::new();

        let rate = failure_rate(metrics.processed, metrics.failed);
        if rate >= policy.unhealthy_failure_rate {
            status = status.max(HealthStatus::Unhealthy);
            warnings.push(format!(
                "failure rate {rate:.2} is at or above the unhealthy threshold {threshold:.2}",
                threshold = policy.unhealthy_failure_rate
            ));
        } else if rate >= policy.degraded_failure_rate {
            status = status.max(HealthStatus::Degraded);
            warnings.push(format!(
                "failure rate {rate:.2} is at or above the degraded threshold {threshold:.2}",
                threshold = policy.degraded_failure_rate
            ));
        }

        if metrics.delayed >= policy.unhealthy_delayed_count {
            status = status.max(HealthStatus::Unhealthy);
            warnings.push(format!(
                "{count} delayed tasks are at or above the unhealthy threshold {threshold}",
                count = metrics.delayed,
                threshold = policy.unhealthy_delayed_count
            ));
        } else if metrics.delayed >= policy.degraded_delayed_count {
            status = status.max(HealthStatus::Degraded);
            warnings.push(format!(
                "{count} delayed tasks are at or above the degraded threshold {threshold}",
                count = metrics.delayed,
                threshold = policy.degraded_delayed_count
            ));
        }

        Self {
            status,
            metrics,
            warnings,
            timestamp: as_of,
        }
    }

    /// Returns the overall classification.
    #[must_use]
    pub const fn status(&self) -> HealthStatus {
        self.status
    }

    /// Returns the gauges backing the classification.
    #[must_use]
    pub const fn metrics(&self) -> HealthMetrics {
        self.metrics
    }

    /// Returns one entry per crossed threshold.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Returns the instant the snapshot was taken.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Share of terminal tasks that failed, zero when none are terminal.
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "health ratios are advisory; f64 rounding is acceptable"
)]
fn failure_rate(processed: u64, failed: u64) -> f64 {
    let terminal = processed + failed;
    if terminal == 0 {
        return 0.0;
    }
    failed as f64 / terminal as f64
}
