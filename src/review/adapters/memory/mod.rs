//! In-memory adapters for review persistence.

mod event;
mod pull_request;

pub use event::InMemoryEventLog;
pub use pull_request::InMemoryPullRequestRepository;
