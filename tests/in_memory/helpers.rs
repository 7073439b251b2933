//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use pr_review::directory::{
    adapters::memory::InMemoryDirectory,
    services::{CreateTeamRequest, TeamDirectoryService},
};
use pr_review::review::{
    adapters::memory::{InMemoryEventLog, InMemoryPullRequestRepository},
    services::{PullRequestLifecycleService, ReviewStatsService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Lifecycle service wired to in-memory adapters.
pub type Lifecycle = PullRequestLifecycleService<
    InMemoryPullRequestRepository,
    InMemoryDirectory,
    InMemoryEventLog,
    DefaultClock,
>;

/// Every service of the crate sharing one set of in-memory stores.
pub struct Stack {
    pub directory: TeamDirectoryService<InMemoryDirectory>,
    pub lifecycle: Lifecycle,
    pub stats: ReviewStatsService<InMemoryEventLog>,
}

/// Provides a fresh service stack for each test.
#[fixture]
pub fn stack() -> Stack {
    let directory = Arc::new(InMemoryDirectory::new());
    let events = Arc::new(InMemoryEventLog::new());
    Stack {
        directory: TeamDirectoryService::new(Arc::clone(&directory)),
        lifecycle: PullRequestLifecycleService::new(
            Arc::new(InMemoryPullRequestRepository::new()),
            directory,
            Arc::clone(&events),
            Arc::new(DefaultClock),
        ),
        stats: ReviewStatsService::new(events),
    }
}

/// Builds a team request whose members are all active and named after
/// their identifiers.
pub fn active_team(name: &str, member_ids: &[&str]) -> CreateTeamRequest {
    member_ids
        .iter()
        .fold(CreateTeamRequest::new(name), |request, id| {
            request.with_member(*id, format!("User {id}"), true)
        })
}

/// Creates `request` through the directory service.
///
/// # Errors
///
/// Returns an error if the directory rejects the team.
pub async fn onboard(stack: &Stack, request: CreateTeamRequest) -> Result<(), eyre::Report> {
    stack
        .directory
        .create_team(request)
        .await
        .map_err(|err| eyre::eyre!("team creation failed: {err}"))?;
    Ok(())
}
