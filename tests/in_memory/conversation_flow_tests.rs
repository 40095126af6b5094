//! Per-task conversation thread flows.

use crate::in_memory::helpers::{QueueHarness, harness, note_submission};
use eyre::ensure;
use rstest::rstest;
use satchel::conversation::domain::Role;
use satchel::conversation::services::ConversationServiceError;
use satchel::error::ErrorKind;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn thread_grows_in_order_across_appends(harness: QueueHarness) -> eyre::Result<()> {
    let task = harness.lifecycle.create("user-1", note_submission()).await?;

    harness
        .conversations
        .append_message(task.id(), "user-1", Role::User, "Focus on definitions")
        .await?;
    let messages = harness
        .conversations
        .append_message(
            task.id(),
            "user-1",
            Role::Assistant,
            "Noted, definitions get their own section.",
        )
        .await?;

    ensure!(messages.len() == 2, "both messages should be in the thread");
    let contents: Vec<&str> = messages.iter().map(|message| message.content()).collect();
    ensure!(
        contents
            == [
                "Focus on definitions",
                "Noted, definitions get their own section.",
            ],
        "messages should keep append order"
    );
    let roles: Vec<Role> = messages.iter().map(|message| message.role()).collect();
    ensure!(
        roles == [Role::User, Role::Assistant],
        "roles should survive the round trip"
    );
    let timestamps: Vec<_> = messages
        .iter()
        .map(|message| message.created_at())
        .collect();
    ensure!(timestamps.is_sorted(), "timestamps should never decrease");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_details_join_the_thread(harness: QueueHarness) -> eyre::Result<()> {
    let task = harness.lifecycle.create("user-1", note_submission()).await?;
    harness
        .conversations
        .append_message(task.id(), "user-1", Role::User, "Shorter bullets please")
        .await?;

    let details = harness.lifecycle.get(task.id(), "user-1").await?;

    ensure!(
        details.messages().len() == 1,
        "task details should include the thread"
    );
    let readback = harness.conversations.get_messages(task.id()).await?;
    ensure!(
        details.messages() == readback.as_slice(),
        "both read paths should agree"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn appends_by_non_owners_leave_the_thread_untouched(
    harness: QueueHarness,
) -> eyre::Result<()> {
    let task = harness.lifecycle.create("user-1", note_submission()).await?;

    let refusal = harness
        .conversations
        .append_message(task.id(), "user-2", Role::User, "Let me in")
        .await;

    let Err(error) = refusal else {
        return Err(eyre::eyre!("expected the append to be refused"));
    };
    ensure!(
        matches!(error, ConversationServiceError::Unauthorized { .. }),
        "non-owner appends are unauthorized"
    );
    ensure!(
        error.kind() == ErrorKind::Unauthorized,
        "boundary classification should match"
    );
    let messages = harness.conversations.get_messages(task.id()).await?;
    ensure!(messages.is_empty(), "no thread should have been created");
    Ok(())
}
