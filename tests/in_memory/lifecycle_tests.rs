//! In-memory integration tests for the pull request lifecycle.

use crate::in_memory::helpers::{Stack, active_team, onboard, stack};
use pr_review::error::ErrorKind;
use pr_review::review::{domain::PullRequestStatus, services::CreatePullRequestRequest};
use rstest::rstest;
use std::collections::HashSet;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reviewer_sets_respect_policy_across_many_pull_requests(
    stack: Stack,
) -> Result<(), eyre::Report> {
    let members = ["a", "b", "c", "d", "e"];
    onboard(&stack, active_team("core", &members)).await?;

    for (index, author) in members.iter().copied().cycle().take(25).enumerate() {
        let pull_request = stack
            .lifecycle
            .create(CreatePullRequestRequest::new(
                format!("pr-{index}"),
                "Routine change",
                author,
            ))
            .await?;

        let reviewers: HashSet<&str> = pull_request
            .reviewers()
            .iter()
            .map(|id| id.as_str())
            .collect();
        eyre::ensure!(reviewers.len() == 2, "expected two distinct reviewers");
        eyre::ensure!(!reviewers.contains(author), "author must not review");
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassignment_keeps_review_within_the_team(stack: Stack) -> Result<(), eyre::Report> {
    onboard(&stack, active_team("core", &["a", "b", "c", "d"])).await?;
    onboard(&stack, active_team("docs", &["x", "y"])).await?;
    let created = stack
        .lifecycle
        .create(CreatePullRequestRequest::new("pr-1", "Refactor", "a"))
        .await?;
    let outgoing = created
        .reviewers()
        .first()
        .cloned()
        .ok_or_else(|| eyre::eyre!("expected a reviewer"))?;

    let reassignment = stack
        .lifecycle
        .reassign_reviewer("pr-1", outgoing.as_str())
        .await?;

    let incoming = stack
        .directory
        .get_user(reassignment.new_reviewer.as_str())
        .await?;
    eyre::ensure!(
        incoming.team_name().map(|name| name.as_str()) == Some("core"),
        "replacement must come from the outgoing reviewer's team"
    );
    let count = reassignment
        .pull_request
        .reviewers()
        .iter()
        .filter(|id| **id == reassignment.new_reviewer)
        .count();
    eyre::ensure!(count == 1, "new reviewer must appear exactly once");
    eyre::ensure!(
        !reassignment.pull_request.is_reviewer(&outgoing),
        "outgoing reviewer must be gone"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn merged_pull_requests_stay_in_the_review_queue(stack: Stack) -> Result<(), eyre::Report> {
    onboard(&stack, active_team("pair", &["a", "b"])).await?;
    stack
        .lifecycle
        .create(CreatePullRequestRequest::new("pr-1", "First", "a"))
        .await?;
    stack
        .lifecycle
        .create(CreatePullRequestRequest::new("pr-2", "Second", "a"))
        .await?;
    stack.lifecycle.merge("pr-1").await?;

    let queue = stack.lifecycle.reviews_for("b").await?;

    let entries: Vec<(&str, PullRequestStatus)> = queue
        .iter()
        .map(|summary| (summary.id.as_str(), summary.status))
        .collect();
    assert_eq!(
        entries,
        vec![
            ("pr-2", PullRequestStatus::Open),
            ("pr-1", PullRequestStatus::Merged)
        ]
    );
    Ok(())
}

#[rstest]
#[case::blank_id("  ", "a")]
#[case::blank_author("pr-1", "")]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_identifiers_are_invalid_input(
    stack: Stack,
    #[case] pr_id: &str,
    #[case] author: &str,
) -> Result<(), eyre::Report> {
    onboard(&stack, active_team("core", &["a", "b"])).await?;

    let err = stack
        .lifecycle
        .create(CreatePullRequestRequest::new(pr_id, "Name", author))
        .await
        .expect_err("identifier should be rejected");

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_pull_request_lookups_are_not_found(stack: Stack) {
    let err = stack
        .lifecycle
        .get_pull_request("pr-404")
        .await
        .expect_err("nothing stored");
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = stack
        .lifecycle
        .reassign_reviewer("pr-404", "a")
        .await
        .expect_err("nothing stored");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
