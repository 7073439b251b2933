//! Given steps for reviewer lifecycle BDD scenarios.

use super::world::{ReviewWorld, run_async, split_ids};
use eyre::WrapErr;
use pr_review::directory::services::CreateTeamRequest;
use pr_review::review::services::CreatePullRequestRequest;
use rstest_bdd_macros::given;

#[given(r#"a team "{team}" with active members "{members}""#)]
fn team_with_active_members(
    world: &mut ReviewWorld,
    team: String,
    members: String,
) -> Result<(), eyre::Report> {
    let request = split_ids(&members)
        .into_iter()
        .fold(CreateTeamRequest::new(team), |request, id| {
            let username = format!("User {id}");
            request.with_member(id, username, true)
        });
    run_async(world.directory.create_team(request)).wrap_err("create team for scenario")?;
    Ok(())
}

#[given(r#""{author}" has opened pull request "{pr_id}" named "{name}""#)]
fn pull_request_opened(
    world: &mut ReviewWorld,
    author: String,
    pr_id: String,
    name: String,
) -> Result<(), eyre::Report> {
    let created = run_async(
        world
            .lifecycle
            .create(CreatePullRequestRequest::new(pr_id, name, author)),
    )
    .wrap_err("open pull request in scenario setup")?;
    world.last_pull_request = Some(created);
    Ok(())
}

#[given(r#"pull request "{pr_id}" has been merged"#)]
fn pull_request_merged(world: &mut ReviewWorld, pr_id: String) -> Result<(), eyre::Report> {
    let merged =
        run_async(world.lifecycle.merge(&pr_id)).wrap_err("merge pull request in scenario setup")?;
    world.last_pull_request = Some(merged);
    Ok(())
}
