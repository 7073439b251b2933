//! When steps for reviewer lifecycle BDD scenarios.

use super::world::{ReviewWorld, run_async};
use pr_review::review::services::{CreatePullRequestRequest, PullRequestLifecycleError};
use rstest_bdd_macros::when;

#[when(r#""{author}" opens pull request "{pr_id}" named "{name}""#)]
fn open_pull_request(world: &mut ReviewWorld, author: String, pr_id: String, name: String) {
    let result = run_async(
        world
            .lifecycle
            .create(CreatePullRequestRequest::new(pr_id, name, author)),
    );
    world.record(result, PullRequestLifecycleError::kind);
}

#[when(r#"pull request "{pr_id}" is merged twice"#)]
fn merge_twice(world: &mut ReviewWorld, pr_id: String) {
    for _ in 0..2 {
        let result = run_async(world.lifecycle.merge(&pr_id));
        world.record(result, PullRequestLifecycleError::kind);
    }
}

#[when(r#"reviewer "{reviewer}" is reassigned on pull request "{pr_id}""#)]
fn reassign_reviewer(world: &mut ReviewWorld, reviewer: String, pr_id: String) {
    let result = run_async(world.lifecycle.reassign_reviewer(&pr_id, &reviewer))
        .map(|reassignment| reassignment.pull_request);
    world.record(result, PullRequestLifecycleError::kind);
}

#[when(r#"the first reviewer of pull request "{pr_id}" is reassigned"#)]
fn reassign_first_reviewer(world: &mut ReviewWorld, pr_id: String) -> Result<(), eyre::Report> {
    let reviewer = world
        .last_pull_request
        .as_ref()
        .and_then(|pull_request| pull_request.reviewers().first().cloned())
        .ok_or_else(|| eyre::eyre!("scenario pull request has no reviewer"))?;
    let result = run_async(
        world
            .lifecycle
            .reassign_reviewer(&pr_id, reviewer.as_str()),
    )
    .map(|reassignment| reassignment.pull_request);
    world.record(result, PullRequestLifecycleError::kind);
    Ok(())
}
