//! Application services for reviewer assignment, the pull request
//! lifecycle, and event statistics.

mod assignment;
mod audit;
mod lifecycle;
mod stats;

pub use assignment::{
    AssignmentError, AssignmentResult, ReviewerAssignmentEngine, initial_candidates,
    replacement_candidates,
};
pub use audit::AuditRecorder;
pub use lifecycle::{
    CreatePullRequestRequest, PullRequestLifecycleError, PullRequestLifecycleResult,
    PullRequestLifecycleService, ReviewerReassignment,
};
pub use stats::{ReviewStatsError, ReviewStatsResult, ReviewStatsService};
