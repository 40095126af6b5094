//! Share link and template derivation flows.

use crate::in_memory::helpers::{QueueHarness, complete, harness, note_submission};
use eyre::{ensure, eyre};
use rstest::rstest;
use satchel::error::ErrorKind;
use satchel::sharing::services::ShareRequest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn public_share_mints_a_link_and_derives_a_template(
    harness: QueueHarness,
) -> eyre::Result<()> {
    let task = harness.lifecycle.create("user-1", note_submission()).await?;
    complete(&harness.lifecycle, task.id()).await?;

    let grant = harness
        .sharing
        .share(task.id(), "user-1", ShareRequest::new(true))
        .await?;
    ensure!(
        grant.share_url() == format!("/shared/{}", grant.share_token()),
        "the URL should embed the token"
    );

    let resolved = harness
        .sharing
        .resolve_share_token(grant.share_token())
        .await?;
    ensure!(
        resolved.id() == task.id(),
        "the token should resolve to the shared task"
    );
    ensure!(
        resolved.result().is_some(),
        "readers should see the completed output"
    );

    let templates = harness.sharing.list_templates("user-1").await?;
    ensure!(
        templates.len() == 1,
        "a public share should derive one template"
    );
    let template = templates
        .first()
        .ok_or_else(|| eyre!("template should exist"))?;
    ensure!(
        template.name().as_str() == "Chapter 3 Notes (Shared by User)",
        "the derived name should carry the shared suffix"
    );
    ensure!(template.is_public(), "the derived template should be public");
    ensure!(
        !template.config().is_empty(),
        "the task configuration should carry over"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resharing_stays_idempotent_for_templates(harness: QueueHarness) -> eyre::Result<()> {
    let task = harness.lifecycle.create("user-1", note_submission()).await?;
    complete(&harness.lifecycle, task.id()).await?;

    let first = harness
        .sharing
        .share(task.id(), "user-1", ShareRequest::new(true))
        .await?;
    let second = harness
        .sharing
        .share(task.id(), "user-1", ShareRequest::new(true))
        .await?;

    ensure!(
        first.share_token() != second.share_token(),
        "each share mints a fresh token"
    );
    let templates = harness.sharing.list_templates("user-1").await?;
    ensure!(
        templates.len() == 1,
        "re-sharing must not duplicate the template"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sharing_requires_a_completed_task(harness: QueueHarness) -> eyre::Result<()> {
    let task = harness.lifecycle.create("user-1", note_submission()).await?;

    let refusal = harness
        .sharing
        .share(task.id(), "user-1", ShareRequest::new(true))
        .await;

    let Err(error) = refusal else {
        return Err(eyre!("expected the share to be refused"));
    };
    ensure!(
        error.kind() == ErrorKind::InvalidState,
        "sharing before completion is an invalid state"
    );
    Ok(())
}
