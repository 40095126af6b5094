//! Stats, health, and dashboard envelope flows.

use crate::in_memory::helpers::{QueueHarness, complete, fail, harness, note_submission};
use chrono::Utc;
use eyre::{ensure, eyre};
use rstest::rstest;
use satchel::task::domain::AgentKind;
use satchel::task::services::TaskSubmission;
use satchel::telemetry::domain::{DashboardResponse, HealthStatus, StatsWindow};
use serde_json::{Value, json};

/// One completed, one failed, one still queued.
async fn seed_queue(harness: &QueueHarness) -> eyre::Result<()> {
    let done = harness.lifecycle.create("user-1", note_submission()).await?;
    complete(&harness.lifecycle, done.id()).await?;
    let broken = harness
        .lifecycle
        .create(
            "user-2",
            TaskSubmission::new(AgentKind::Researcher, "course-7", "Sources survey"),
        )
        .await?;
    fail(&harness.lifecycle, broken.id()).await?;
    harness
        .lifecycle
        .create(
            "user-1",
            TaskSubmission::new(AgentKind::StudyBuddy, "course-7", "Revision drill"),
        )
        .await?;
    Ok(())
}

fn pointer<'a>(value: &'a Value, path: &str) -> eyre::Result<&'a Value> {
    value
        .pointer(path)
        .ok_or_else(|| eyre!("missing dashboard field {path}"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn hourly_stats_reflect_the_seeded_queue(harness: QueueHarness) -> eyre::Result<()> {
    seed_queue(&harness).await?;

    let stats = harness
        .stats
        .window_stats(StatsWindow::Hourly, Utc::now())
        .await?;

    ensure!(stats.total() == 2, "both terminal tasks should bucket");
    ensure!(stats.successful() == 1, "one completion should bucket");
    ensure!(stats.failed() == 1, "one failure should bucket");
    ensure!(
        stats.by_agent_type().get("note-taker") == Some(&1),
        "agent grouping should count the completion"
    );
    ensure!(
        stats.by_user().get("user-2") == Some(&1),
        "owner grouping should count the failure"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_collection_over_an_idle_queue_agrees(harness: QueueHarness) -> eyre::Result<()> {
    seed_queue(&harness).await?;
    let as_of = Utc::now();

    let first = harness.stats.window_stats(StatsWindow::Hourly, as_of).await?;
    let second = harness.stats.window_stats(StatsWindow::Hourly, as_of).await?;

    ensure!(first == second, "collection must not perturb the queue");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn health_classifies_the_seeded_queue(harness: QueueHarness) -> eyre::Result<()> {
    seed_queue(&harness).await?;

    let health = harness.stats.health(Utc::now()).await?;

    ensure!(
        health.metrics().processed() == 1,
        "completions count store-wide"
    );
    ensure!(health.metrics().failed() == 1, "failures count store-wide");
    ensure!(health.metrics().waiting() == 1, "queued tasks are waiting");
    ensure!(
        health.status() == HealthStatus::Unhealthy,
        "a one-in-two failure rate crosses the unhealthy threshold"
    );
    ensure!(
        !health.warnings().is_empty(),
        "crossed thresholds should warn"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dashboard_envelope_matches_the_boundary_contract(
    harness: QueueHarness,
) -> eyre::Result<()> {
    seed_queue(&harness).await?;

    let snapshot = harness.stats.dashboard().await?;
    let response = DashboardResponse::new(snapshot);
    let value = serde_json::to_value(&response)?;

    ensure!(
        pointer(&value, "/success")? == &json!(true),
        "the envelope should report success"
    );
    ensure!(
        pointer(&value, "/data/stats/hourly/total")? == &json!(2),
        "hourly totals should flow into the envelope"
    );
    ensure!(
        pointer(&value, "/data/stats/daily/successful")? == &json!(1),
        "daily totals should flow into the envelope"
    );
    ensure!(
        pointer(&value, "/data/health/metrics/processed")? == &json!(1),
        "health metrics should flow into the envelope"
    );
    ensure!(
        pointer(&value, "/data/health/status")? == &json!("unhealthy"),
        "the status label should serialise in lowercase"
    );
    for path in [
        "/data/timestamp",
        "/data/health/timestamp",
        "/data/health/warnings",
        "/data/stats/hourly/byAgentType",
        "/data/stats/hourly/byUser",
        "/data/stats/hourly/averageTokens",
        "/data/stats/hourly/totalCost",
        "/data/health/metrics/averageProcessingTime",
        "/data/health/metrics/delayed",
    ] {
        pointer(&value, path)?;
    }
    Ok(())
}
