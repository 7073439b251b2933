//! In-memory integration tests for the audit log read path.

use crate::in_memory::helpers::{Stack, active_team, onboard, stack};
use pr_review::review::{
    domain::{EventKind, EventPayload},
    services::CreatePullRequestRequest,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn totals_equal_the_sum_of_kind_counts(stack: Stack) -> Result<(), eyre::Report> {
    onboard(&stack, active_team("core", &["a", "b", "c", "d"])).await?;
    let created = stack
        .lifecycle
        .create(CreatePullRequestRequest::new("pr-1", "Change", "a"))
        .await?;
    let outgoing = created
        .reviewers()
        .first()
        .cloned()
        .ok_or_else(|| eyre::eyre!("expected a reviewer"))?;
    stack
        .lifecycle
        .reassign_reviewer("pr-1", outgoing.as_str())
        .await?;
    stack.lifecycle.merge("pr-1").await?;
    stack.lifecycle.merge("pr-1").await?;

    let stats = stack.stats.get_stats().await?;

    eyre::ensure!(
        stats.total_events == stats.event_counts.values().sum::<u64>(),
        "total must equal the sum of counts"
    );
    eyre::ensure!(stats.total_events == 5, "got {stats:?}");
    eyre::ensure!(stats.count(EventKind::ReviewerReassigned) == 1, "one reassignment");
    eyre::ensure!(stats.count(EventKind::PrMerged) == 1, "one merge");
    eyre::ensure!(stats.count(EventKind::ReviewerUnassigned) == 0, "no unassignment");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stats_serialize_with_snake_case_kinds(stack: Stack) -> Result<(), eyre::Report> {
    let stats = stack.stats.get_stats().await?;

    let encoded = serde_json::to_value(&stats)?;

    eyre::ensure!(encoded["total_events"] == 0, "empty log");
    for kind in EventKind::ALL {
        eyre::ensure!(
            encoded["event_counts"][kind.as_str()] == 0,
            "missing {kind} in {encoded}"
        );
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_returns_newest_events_first(stack: Stack) -> Result<(), eyre::Report> {
    onboard(&stack, active_team("core", &["a", "b"])).await?;
    for id in ["pr-1", "pr-2", "pr-3"] {
        stack
            .lifecycle
            .create(CreatePullRequestRequest::new(id, format!("Change {id}"), "a"))
            .await?;
    }

    let events = stack.stats.list_events(EventKind::PrCreated, 2).await?;

    let names: Vec<String> = events
        .iter()
        .filter_map(|event| match event.payload() {
            EventPayload::PrCreated(data) => Some(data.pr_name.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["Change pr-3", "Change pr-2"]);
    Ok(())
}
