//! Port contracts for pull request and audit event persistence.

mod event_repository;
mod pull_request_repository;

pub use event_repository::{EventRepository, EventRepositoryError, EventRepositoryResult};
pub use pull_request_repository::{
    PullRequestRepository, PullRequestRepositoryError, PullRequestRepositoryResult,
};
