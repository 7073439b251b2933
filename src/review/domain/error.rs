//! Error types for review domain validation and parsing.

use super::PullRequestId;
use crate::directory::domain::UserId;
use thiserror::Error;

/// Errors returned while constructing or mutating pull requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReviewDomainError {
    /// The pull request identifier is empty after trimming.
    #[error("pull request identifier must not be empty")]
    EmptyPullRequestId,

    /// The pull request identifier exceeds the 255-character storage limit.
    #[error("pull request identifier exceeds 255 character limit: {0}")]
    PullRequestIdTooLong(String),

    /// The pull request name is empty after trimming.
    #[error("pull request name must not be empty")]
    EmptyPullRequestName,

    /// The pull request name exceeds the 255-character storage limit.
    #[error("pull request name exceeds 255 character limit")]
    PullRequestNameTooLong,

    /// Reviewers cannot change once the pull request is merged.
    #[error("pull request {0} is merged")]
    PullRequestMerged(PullRequestId),

    /// The reviewer to replace is not assigned to the pull request.
    #[error("user {reviewer_id} is not a reviewer of pull request {pull_request_id}")]
    ReviewerNotAssigned {
        /// Pull request whose reviewer set was inspected.
        pull_request_id: PullRequestId,
        /// The user that was expected to be a reviewer.
        reviewer_id: UserId,
    },

    /// The author cannot review their own pull request.
    #[error("author {0} cannot review their own pull request")]
    AuthorAssignedAsReviewer(UserId),

    /// The same reviewer appears twice.
    #[error("user {0} is already a reviewer")]
    DuplicateReviewer(UserId),

    /// More reviewers than the policy allows.
    #[error("{0} reviewers exceed the limit of two")]
    TooManyReviewers(usize),
}

/// Error returned while parsing pull request statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown pull request status: {0}")]
pub struct ParsePullRequestStatusError(pub String);

/// Error returned while parsing event kinds from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown event type: {0}")]
pub struct ParseEventKindError(pub String);
