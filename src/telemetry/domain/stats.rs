//! Windowed throughput and usage aggregation.

use crate::task::domain::{Task, TaskStatus};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Aggregation window for throughput stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsWindow {
    /// Trailing hour.
    Hourly,
    /// Trailing twenty-four hours.
    Daily,
}

impl StatsWindow {
    /// Returns the window length.
    #[must_use]
    pub const fn duration(self) -> Duration {
        match self {
            Self::Hourly => Duration::hours(1),
            Self::Daily => Duration::hours(24),
        }
    }

    /// Returns the window name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
        }
    }
}

impl std::fmt::Display for StatsWindow {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Throughput and usage totals over one aggregation window.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowStats {
    total: u64,
    successful: u64,
    failed: u64,
    by_agent_type: HashMap<String, u64>,
    by_user: HashMap<String, u64>,
    average_tokens: f64,
    total_cost: f64,
}

impl WindowStats {
    /// Folds a store snapshot into totals for the window ending at `as_of`.
    ///
    /// A task contributes when its terminal instant lies in
    /// `(as_of - window, as_of]`; completed tasks bucket on `completed_at`
    /// and failed tasks on their final `updated_at`. Absent usage fields
    /// contribute zero.
    #[must_use]
    pub fn collect(tasks: &[Task], window: StatsWindow, as_of: DateTime<Utc>) -> Self {
        let opens_after = as_of - window.duration();
        let bucketed: Vec<&Task> = tasks
            .iter()
            .filter(|task| {
                task.terminal_at()
                    .is_some_and(|instant| instant > opens_after && instant <= as_of)
            })
            .collect();

        let mut successful = 0_u64;
        let mut failed = 0_u64;
        let mut token_sum = 0_u64;
        let mut by_agent_type: HashMap<String, u64> = HashMap::new();
        let mut by_user: HashMap<String, u64> = HashMap::new();
        for task in &bucketed {
            if task.status() == TaskStatus::Completed {
                successful += 1;
                if let Some(usage) = task.usage() {
                    token_sum += usage.tokens_used();
                }
            } else {
                failed += 1;
            }
            *by_agent_type
                .entry(task.agent_kind().as_str().to_owned())
                .or_default() += 1;
            *by_user.entry(task.owner().as_str().to_owned()).or_default() += 1;
        }

        Self {
            total: successful + failed,
            successful,
            failed,
            by_agent_type,
            by_user,
            average_tokens: mean(token_sum, successful),
            total_cost: sum_costs(&bucketed),
        }
    }

    /// Count of tasks that reached a terminal status in the window.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Count of tasks completed in the window.
    #[must_use]
    pub const fn successful(&self) -> u64 {
        self.successful
    }

    /// Count of tasks failed in the window.
    #[must_use]
    pub const fn failed(&self) -> u64 {
        self.failed
    }

    /// Terminal counts keyed by agent variety.
    #[must_use]
    pub const fn by_agent_type(&self) -> &HashMap<String, u64> {
        &self.by_agent_type
    }

    /// Terminal counts keyed by owning user.
    #[must_use]
    pub const fn by_user(&self) -> &HashMap<String, u64> {
        &self.by_user
    }

    /// Mean tokens consumed per completed task, zero when none completed.
    #[must_use]
    pub const fn average_tokens(&self) -> f64 {
        self.average_tokens
    }

    /// Total cost across completed tasks in the window.
    #[must_use]
    pub const fn total_cost(&self) -> f64 {
        self.total_cost
    }
}

/// Mean of `sum` over `count` observations, zero when there are none.
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "aggregate averages are advisory; f64 rounding is acceptable"
)]
pub(crate) fn mean(sum: u64, count: u64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    sum as f64 / count as f64
}

/// Sums the reported cost of every completed task carrying usage data.
#[expect(
    clippy::float_arithmetic,
    reason = "cost totals are advisory f64 sums over reported usage"
)]
fn sum_costs(tasks: &[&Task]) -> f64 {
    tasks
        .iter()
        .filter(|task| task.status() == TaskStatus::Completed)
        .filter_map(|task| task.usage())
        .fold(0.0, |total, usage| total + usage.cost())
}
