//! Shared world state for reviewer lifecycle BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use pr_review::directory::{adapters::memory::InMemoryDirectory, services::TeamDirectoryService};
use pr_review::error::ErrorKind;
use pr_review::review::{
    adapters::memory::{InMemoryEventLog, InMemoryPullRequestRepository},
    domain::PullRequest,
    services::{PullRequestLifecycleService, ReviewStatsService},
};
use rstest::fixture;

/// Lifecycle service type used by the BDD world.
pub type TestLifecycle = PullRequestLifecycleService<
    InMemoryPullRequestRepository,
    InMemoryDirectory,
    InMemoryEventLog,
    DefaultClock,
>;

/// Scenario world for reviewer lifecycle behaviour tests.
pub struct ReviewWorld {
    pub directory: TeamDirectoryService<InMemoryDirectory>,
    pub lifecycle: TestLifecycle,
    pub stats: ReviewStatsService<InMemoryEventLog>,
    pub last_pull_request: Option<PullRequest>,
    pub previous_pull_request: Option<PullRequest>,
    pub last_error: Option<ErrorKind>,
}

impl ReviewWorld {
    /// Creates a world backed by empty in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let directory = Arc::new(InMemoryDirectory::new());
        let events = Arc::new(InMemoryEventLog::new());
        Self {
            directory: TeamDirectoryService::new(Arc::clone(&directory)),
            lifecycle: PullRequestLifecycleService::new(
                Arc::new(InMemoryPullRequestRepository::new()),
                directory,
                Arc::clone(&events),
                Arc::new(DefaultClock),
            ),
            stats: ReviewStatsService::new(events),
            last_pull_request: None,
            previous_pull_request: None,
            last_error: None,
        }
    }

    /// Records the outcome of a lifecycle call.
    pub fn record<E>(&mut self, result: Result<PullRequest, E>, kind_of: impl Fn(&E) -> ErrorKind) {
        match result {
            Ok(pull_request) => {
                self.previous_pull_request = self.last_pull_request.replace(pull_request);
                self.last_error = None;
            }
            Err(err) => self.last_error = Some(kind_of(&err)),
        }
    }
}

impl Default for ReviewWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ReviewWorld {
    ReviewWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Splits a comma-separated list of identifiers.
pub fn split_ids(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .collect()
}
