//! Repository port for pull request persistence.

use crate::directory::domain::UserId;
use crate::review::domain::{PullRequest, PullRequestId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for pull request repository operations.
pub type PullRequestRepositoryResult<T> = Result<T, PullRequestRepositoryError>;

/// Pull request persistence contract.
///
/// A pull request and its reviewer links form one unit: every write commits
/// both or neither.
#[async_trait]
pub trait PullRequestRepository: Send + Sync {
    /// Stores a new pull request together with its reviewer links.
    ///
    /// # Errors
    ///
    /// Returns [`PullRequestRepositoryError::DuplicatePullRequest`] when the
    /// identifier is taken.
    async fn store(&self, pull_request: &PullRequest) -> PullRequestRepositoryResult<()>;

    /// Replaces the mutable fields and the full reviewer set.
    ///
    /// # Errors
    ///
    /// Returns [`PullRequestRepositoryError::NotFound`] when the pull request
    /// does not exist.
    async fn update(&self, pull_request: &PullRequest) -> PullRequestRepositoryResult<()>;

    /// Finds a pull request by identifier.
    ///
    /// Returns `None` when the pull request does not exist.
    async fn find_by_id(&self, id: &PullRequestId)
    -> PullRequestRepositoryResult<Option<PullRequest>>;

    /// Returns whether a pull request with the identifier exists.
    async fn exists(&self, id: &PullRequestId) -> PullRequestRepositoryResult<bool>;

    /// Returns every pull request `reviewer_id` currently reviews, newest
    /// first.
    async fn list_by_reviewer(&self, reviewer_id: &UserId)
    -> PullRequestRepositoryResult<Vec<PullRequest>>;
}

/// Errors returned by pull request repository implementations.
#[derive(Debug, Clone, Error)]
pub enum PullRequestRepositoryError {
    /// A pull request with the same identifier already exists.
    #[error("duplicate pull request identifier: {0}")]
    DuplicatePullRequest(PullRequestId),

    /// The pull request was not found.
    #[error("pull request not found: {0}")]
    NotFound(PullRequestId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PullRequestRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<diesel::result::Error> for PullRequestRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}
