//! In-memory integration tests for team onboarding and user management.

use crate::in_memory::helpers::{Stack, active_team, onboard, stack};
use pr_review::error::ErrorKind;
use pr_review::review::services::CreatePullRequestRequest;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn onboarding_a_team_makes_members_resolvable(stack: Stack) -> Result<(), eyre::Report> {
    onboard(&stack, active_team("payments", &["p1", "p2", "p3"])).await?;

    let team = stack.directory.get_team("payments").await?;
    eyre::ensure!(team.members().len() == 3, "expected three members");

    let member = stack.directory.get_user("p2").await?;
    eyre::ensure!(
        member.team_name().map(|name| name.as_str()) == Some("payments"),
        "member should belong to payments"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_user_cannot_join_a_second_team(stack: Stack) -> Result<(), eyre::Report> {
    onboard(&stack, active_team("payments", &["p1", "p2"])).await?;

    let err = stack
        .directory
        .create_team(active_team("search", &["s1", "p2"]))
        .await
        .expect_err("p2 already belongs to payments");

    assert_eq!(err.kind(), ErrorKind::Conflict);
    let missing = stack
        .directory
        .get_user("s1")
        .await
        .expect_err("rejected team must not upsert members");
    assert_eq!(missing.kind(), ErrorKind::NotFound);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_team_name_is_already_exists(stack: Stack) -> Result<(), eyre::Report> {
    onboard(&stack, active_team("payments", &["p1"])).await?;

    let err = stack
        .directory
        .create_team(active_team("payments", &["p9"]))
        .await
        .expect_err("name is taken");

    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deactivated_user_drops_out_of_reviewer_pool(stack: Stack) -> Result<(), eyre::Report> {
    onboard(&stack, active_team("payments", &["p1", "p2", "p3"])).await?;
    let updated = stack.directory.set_user_active("p3", false).await?;
    eyre::ensure!(!updated.is_active(), "p3 should be inactive");

    for index in 0..10 {
        let pull_request = stack
            .lifecycle
            .create(CreatePullRequestRequest::new(
                format!("pr-{index}"),
                "Ledger fix",
                "p1",
            ))
            .await?;
        eyre::ensure!(
            pull_request.reviewers().iter().map(|id| id.as_str()).eq(["p2"]),
            "only p2 may review, got {:?}",
            pull_request.reviewers()
        );
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_author_cannot_open_pull_requests(stack: Stack) {
    let err = stack
        .lifecycle
        .create(CreatePullRequestRequest::new("pr-1", "Orphan", "nobody"))
        .await
        .expect_err("unknown author");

    assert_eq!(err.kind(), ErrorKind::NotFound);
}
