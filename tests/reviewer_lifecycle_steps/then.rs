//! Then steps for reviewer lifecycle BDD scenarios.

use super::world::{ReviewWorld, run_async, split_ids};
use pr_review::review::domain::{EventKind, PullRequestStatus};
use rstest_bdd_macros::then;
use std::collections::HashSet;

#[then(r#"the pull request has {count} distinct reviewers drawn from "{pool}""#)]
fn distinct_reviewers_from_pool(
    world: &ReviewWorld,
    count: usize,
    pool: String,
) -> Result<(), eyre::Report> {
    let pull_request = world
        .last_pull_request
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing pull request"))?;
    let allowed: HashSet<String> = split_ids(&pool).into_iter().collect();
    let reviewers: HashSet<String> = pull_request
        .reviewers()
        .iter()
        .map(|id| id.as_str().to_owned())
        .collect();

    eyre::ensure!(
        reviewers.len() == count && pull_request.reviewers().len() == count,
        "expected {count} distinct reviewers, got {:?}",
        pull_request.reviewers()
    );
    eyre::ensure!(
        reviewers.is_subset(&allowed),
        "reviewers {reviewers:?} not drawn from {allowed:?}"
    );
    Ok(())
}

#[then(r#"the last operation fails with "{kind}""#)]
fn last_operation_fails(world: &ReviewWorld, kind: String) -> Result<(), eyre::Report> {
    let actual = world
        .last_error
        .ok_or_else(|| eyre::eyre!("expected the last operation to fail"))?;
    eyre::ensure!(
        actual.as_str() == kind,
        "expected {kind}, got {}",
        actual.as_str()
    );
    Ok(())
}

#[then("both merges return the same pull request")]
fn merges_agree(world: &ReviewWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(world.last_error.is_none(), "a merge failed");
    eyre::ensure!(
        world.previous_pull_request.is_some()
            && world.previous_pull_request == world.last_pull_request,
        "repeated merge changed the pull request"
    );
    Ok(())
}

#[then(r#"the pull request status is "{status}""#)]
fn pull_request_status_is(world: &ReviewWorld, status: String) -> Result<(), eyre::Report> {
    let expected = PullRequestStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let pull_request = world
        .last_pull_request
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing pull request"))?;
    eyre::ensure!(
        pull_request.status() == expected,
        "expected {expected}, found {}",
        pull_request.status()
    );
    Ok(())
}

#[then(r#"exactly {count} "{kind}" event is recorded"#)]
fn exactly_events_recorded(
    world: &ReviewWorld,
    count: u64,
    kind: String,
) -> Result<(), eyre::Report> {
    let event_kind = EventKind::try_from(kind.as_str())
        .map_err(|err| eyre::eyre!("invalid event kind in scenario: {err}"))?;
    let stats = run_async(world.stats.get_stats())?;
    eyre::ensure!(
        stats.count(event_kind) == count,
        "expected {count} {kind} events, found {}",
        stats.count(event_kind)
    );
    Ok(())
}
