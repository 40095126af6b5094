//! Submission-to-terminal lifecycle flows.

use crate::in_memory::helpers::{
    QueueHarness, begin_processing, complete, fail, harness, note_submission,
};
use eyre::{ensure, eyre};
use rstest::rstest;
use satchel::conversation::domain::Role;
use satchel::error::ErrorKind;
use satchel::task::domain::{AgentKind, Progress, TaskStatus};
use satchel::task::services::{ListQuery, TaskLifecycleError, TaskSubmission};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn note_taker_task_runs_from_submission_to_completion(
    harness: QueueHarness,
) -> eyre::Result<()> {
    let task = harness.lifecycle.create("user-1", note_submission()).await?;
    ensure!(
        task.status() == TaskStatus::Queued,
        "fresh task should be queued"
    );
    ensure!(
        task.created_at() == task.updated_at(),
        "creation should pin both timestamps"
    );
    ensure!(
        task.files().len() == 1,
        "submission files should pass through"
    );

    let processing = begin_processing(&harness.lifecycle, task.id()).await?;
    ensure!(
        processing.status() == TaskStatus::Processing,
        "worker should hold the task"
    );
    ensure!(
        processing.progress() == Some(Progress::new(10)?),
        "progress should record"
    );

    let completed = complete(&harness.lifecycle, task.id()).await?;
    ensure!(
        completed.status() == TaskStatus::Completed,
        "task should complete"
    );
    let result = completed
        .result()
        .ok_or_else(|| eyre!("completed task should carry a result"))?;
    ensure!(result.format() == "md", "format should pass through");
    ensure!(
        result.content().starts_with("# Notes"),
        "content should pass through"
    );
    ensure!(result.metadata().is_empty(), "metadata defaults to empty");
    let usage = completed
        .usage()
        .ok_or_else(|| eyre!("completed task should carry usage"))?;
    ensure!(usage.tokens_used() == 500, "token count should record");
    ensure!(
        usage.processing_time() == 1200,
        "processing time should record"
    );
    ensure!(
        completed.completed_at() == Some(completed.updated_at()),
        "completion pins the terminal timestamp"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_task_keeps_the_reason_and_stays_terminal(
    harness: QueueHarness,
) -> eyre::Result<()> {
    let task = harness.lifecycle.create("user-1", note_submission()).await?;
    begin_processing(&harness.lifecycle, task.id()).await?;
    let failed = fail(&harness.lifecycle, task.id()).await?;

    ensure!(failed.status() == TaskStatus::Failed, "task should fail");
    ensure!(
        failed.error() == Some("agent crashed"),
        "failure reason should record"
    );
    ensure!(failed.result().is_none(), "failure stores no result");

    let retry = begin_processing(&harness.lifecycle, task.id()).await;
    ensure!(retry.is_err(), "terminal tasks reject further updates");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_returns_the_owners_tasks_newest_first(harness: QueueHarness) -> eyre::Result<()> {
    for name in ["First", "Second", "Third"] {
        harness
            .lifecycle
            .create(
                "user-1",
                TaskSubmission::new(AgentKind::Researcher, "course-7", name),
            )
            .await?;
    }
    harness
        .lifecycle
        .create(
            "user-2",
            TaskSubmission::new(AgentKind::Researcher, "course-7", "Foreign"),
        )
        .await?;

    let page = harness
        .lifecycle
        .list("user-1", ListQuery::new().with_limit(2))
        .await?;

    ensure!(page.tasks().len() == 2, "limit should truncate the page");
    ensure!(page.has_more(), "truncation should flag more results");
    let timestamps: Vec<_> = page.tasks().iter().map(|task| task.created_at()).collect();
    ensure!(
        timestamps.is_sorted_by(|a, b| a >= b),
        "tasks should list newest first"
    );
    ensure!(
        page.tasks().iter().all(|task| task.owner().as_str() == "user-1"),
        "listing should only show the requester's tasks"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_by_non_owner_leaves_the_task_intact(harness: QueueHarness) -> eyre::Result<()> {
    let task = harness.lifecycle.create("user-1", note_submission()).await?;

    let refusal = harness.lifecycle.delete(task.id(), "user-2").await;
    let Err(error) = refusal else {
        return Err(eyre!("expected the delete to be refused"));
    };
    ensure!(
        matches!(error, TaskLifecycleError::Unauthorized { .. }),
        "non-owner deletes are unauthorized"
    );
    ensure!(
        error.kind() == ErrorKind::Unauthorized,
        "boundary classification should match"
    );

    let details = harness.lifecycle.get(task.id(), "user-1").await?;
    ensure!(
        details.task().id() == task.id(),
        "the task should remain retrievable by its owner"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_cascades_to_the_conversation(harness: QueueHarness) -> eyre::Result<()> {
    let task = harness.lifecycle.create("user-1", note_submission()).await?;
    harness
        .conversations
        .append_message(task.id(), "user-1", Role::User, "Focus on definitions")
        .await?;

    harness.lifecycle.delete(task.id(), "user-1").await?;

    let gone = harness.lifecycle.get(task.id(), "user-1").await;
    ensure!(gone.is_err(), "the task record should be gone");
    let messages = harness.conversations.get_messages(task.id()).await?;
    ensure!(
        messages.is_empty(),
        "the conversation should be deleted with its task"
    );
    Ok(())
}
