//! Domain model for pull requests, their reviewers, and audit events.

mod error;
mod event;
mod ids;
mod pull_request;
mod stats;

pub use error::{ParseEventKindError, ParsePullRequestStatusError, ReviewDomainError};
pub use event::{
    Event, EventKind, EventPayload, NewEvent, PersistedEventData, PrCreatedData, PrMergedData,
    ReviewerAssignedData, ReviewerReassignedData, ReviewerUnassignedData,
};
pub use ids::{EventId, PullRequestId};
pub use pull_request::{
    MAX_REVIEWERS, MergeOutcome, PersistedPullRequestData, PullRequest, PullRequestStatus,
    PullRequestSummary,
};
pub use stats::StatsResponse;
