//! Pull request lifecycle orchestration: open, merge, and reviewer
//! replacement, each followed by best-effort audit events.

use super::{AssignmentError, AuditRecorder, ReviewerAssignmentEngine};
use crate::directory::{
    domain::{DirectoryDomainError, UserId},
    ports::{DirectoryRepository, DirectoryRepositoryError},
};
use crate::error::ErrorKind;
use crate::review::{
    domain::{
        MergeOutcome, NewEvent, PullRequest, PullRequestId, PullRequestSummary, ReviewDomainError,
    },
    ports::{EventRepository, PullRequestRepository, PullRequestRepositoryError},
};
use mockable::Clock;
use rand::RngCore;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for opening a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePullRequestRequest {
    id: String,
    name: String,
    author_id: String,
}

impl CreatePullRequestRequest {
    /// Creates a request with every required field.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        author_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            author_id: author_id.into(),
        }
    }
}

/// Outcome of a successful reviewer replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewerReassignment {
    /// The pull request after the replacement was persisted.
    pub pull_request: PullRequest,
    /// The reviewer that took the freed slot.
    pub new_reviewer: UserId,
}

/// Service-level errors for pull request lifecycle operations.
#[derive(Debug, Error)]
pub enum PullRequestLifecycleError {
    /// Pull request validation or state rule failed.
    #[error(transparent)]
    Domain(#[from] ReviewDomainError),
    /// A user identifier failed validation.
    #[error(transparent)]
    Identifier(#[from] DirectoryDomainError),
    /// Pull request persistence failed.
    #[error(transparent)]
    Repository(#[from] PullRequestRepositoryError),
    /// Directory lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryRepositoryError),
    /// Reviewer selection failed.
    #[error(transparent)]
    Assignment(#[from] AssignmentError),
    /// A pull request with the identifier already exists.
    #[error("pull request already exists: {0}")]
    AlreadyExists(PullRequestId),
    /// The pull request does not exist.
    #[error("pull request not found: {0}")]
    NotFound(PullRequestId),
    /// The author does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// The author does not belong to any team.
    #[error("user {0} does not belong to a team")]
    TeamNotFound(UserId),
}

impl PullRequestLifecycleError {
    /// Classifies the error for boundary-layer mapping.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => domain_error_kind(err),
            Self::Identifier(_) => ErrorKind::InvalidInput,
            Self::AlreadyExists(_)
            | Self::Repository(PullRequestRepositoryError::DuplicatePullRequest(_)) => {
                ErrorKind::AlreadyExists
            }
            Self::NotFound(_)
            | Self::UserNotFound(_)
            | Self::TeamNotFound(_)
            | Self::Repository(PullRequestRepositoryError::NotFound(_))
            | Self::Directory(DirectoryRepositoryError::UserNotFound(_)) => ErrorKind::NotFound,
            Self::Assignment(AssignmentError::NoCandidate { .. }) => ErrorKind::NoCandidate,
            Self::Directory(DirectoryRepositoryError::DuplicateTeam(_)) => {
                ErrorKind::AlreadyExists
            }
            Self::Directory(DirectoryRepositoryError::MemberOfAnotherTeam { .. }) => {
                ErrorKind::Conflict
            }
            Self::Repository(
                PullRequestRepositoryError::InvalidPersistedData(_)
                | PullRequestRepositoryError::Persistence(_),
            )
            | Self::Directory(
                DirectoryRepositoryError::InvalidPersistedData(_)
                | DirectoryRepositoryError::Persistence(_),
            )
            | Self::Assignment(AssignmentError::Directory(_)) => ErrorKind::Unexpected,
        }
    }
}

const fn domain_error_kind(err: &ReviewDomainError) -> ErrorKind {
    match err {
        ReviewDomainError::EmptyPullRequestId
        | ReviewDomainError::PullRequestIdTooLong(_)
        | ReviewDomainError::EmptyPullRequestName
        | ReviewDomainError::PullRequestNameTooLong => ErrorKind::InvalidInput,
        ReviewDomainError::ReviewerNotAssigned { .. } => ErrorKind::InvalidState,
        ReviewDomainError::PullRequestMerged(_)
        | ReviewDomainError::AuthorAssignedAsReviewer(_)
        | ReviewDomainError::DuplicateReviewer(_)
        | ReviewDomainError::TooManyReviewers(_) => ErrorKind::Conflict,
    }
}

/// Result type for pull request lifecycle operations.
pub type PullRequestLifecycleResult<T> = Result<T, PullRequestLifecycleError>;

/// Pull request lifecycle orchestration service.
#[derive(Clone)]
pub struct PullRequestLifecycleService<P, D, E, C>
where
    P: PullRequestRepository,
    D: DirectoryRepository,
    E: EventRepository,
    C: Clock + Send + Sync,
{
    pull_requests: Arc<P>,
    directory: Arc<D>,
    engine: Arc<ReviewerAssignmentEngine<D>>,
    audit: AuditRecorder<E>,
    clock: Arc<C>,
}

impl<P, D, E, C> PullRequestLifecycleService<P, D, E, C>
where
    P: PullRequestRepository,
    D: DirectoryRepository,
    E: EventRepository,
    C: Clock + Send + Sync,
{
    /// Creates a lifecycle service whose reviewer selection is seeded from
    /// the clock.
    #[must_use]
    pub fn new(pull_requests: Arc<P>, directory: Arc<D>, events: Arc<E>, clock: Arc<C>) -> Self {
        let engine = ReviewerAssignmentEngine::new(Arc::clone(&directory), &*clock);
        Self {
            pull_requests,
            directory,
            engine: Arc::new(engine),
            audit: AuditRecorder::new(events),
            clock,
        }
    }

    /// Replaces the reviewer selection generator, typically with a seeded
    /// one for reproducible tests.
    #[must_use]
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.engine = Arc::new(ReviewerAssignmentEngine::with_rng(
            Arc::clone(&self.directory),
            rng,
        ));
        self
    }

    /// Opens a pull request and assigns up to two reviewers from the
    /// author's team.
    ///
    /// # Errors
    ///
    /// Returns [`PullRequestLifecycleError::AlreadyExists`] when the
    /// identifier is taken, [`PullRequestLifecycleError::UserNotFound`] when
    /// the author is unknown, [`PullRequestLifecycleError::TeamNotFound`]
    /// when the author has no team, or a validation or persistence error.
    pub async fn create(
        &self,
        request: CreatePullRequestRequest,
    ) -> PullRequestLifecycleResult<PullRequest> {
        let CreatePullRequestRequest {
            id,
            name,
            author_id,
        } = request;
        let pr_id = PullRequestId::new(id)?;
        let author = UserId::new(author_id)?;

        if self.pull_requests.exists(&pr_id).await? {
            return Err(PullRequestLifecycleError::AlreadyExists(pr_id));
        }

        let author_record = self
            .directory
            .find_user(&author)
            .await?
            .ok_or_else(|| PullRequestLifecycleError::UserNotFound(author.clone()))?;
        let team_name = author_record
            .team_name()
            .ok_or_else(|| PullRequestLifecycleError::TeamNotFound(author.clone()))?;

        let reviewers = self
            .engine
            .select_initial_reviewers(team_name, &author)
            .await?;
        let pull_request = PullRequest::open(pr_id, name, author, reviewers, &*self.clock)?;
        self.pull_requests.store(&pull_request).await?;

        tracing::info!(
            pr_id = %pull_request.id(),
            author_id = %pull_request.author_id(),
            team_name = %team_name,
            reviewer_count = pull_request.reviewers().len(),
            "pull request created"
        );

        self.audit.record(&NewEvent::pr_created(&pull_request)).await;
        for reviewer in pull_request.reviewers() {
            self.audit
                .record(&NewEvent::reviewer_assigned(&pull_request, reviewer))
                .await;
        }
        Ok(pull_request)
    }

    /// Merges a pull request. Merging an already merged pull request returns
    /// it unchanged without writing or recording anything.
    ///
    /// # Errors
    ///
    /// Returns [`PullRequestLifecycleError::NotFound`] when the pull request
    /// does not exist, or a persistence error.
    pub async fn merge(&self, id: &str) -> PullRequestLifecycleResult<PullRequest> {
        let pr_id = PullRequestId::new(id)?;
        let mut pull_request = self.find_or_error(pr_id).await?;

        let MergeOutcome::Merged { merged_at } = pull_request.merge(&*self.clock) else {
            tracing::debug!(pr_id = %pull_request.id(), "pull request already merged");
            return Ok(pull_request);
        };

        self.pull_requests.update(&pull_request).await?;
        tracing::info!(pr_id = %pull_request.id(), "pull request merged");

        self.audit
            .record(&NewEvent::pr_merged(&pull_request, merged_at))
            .await;
        Ok(pull_request)
    }

    /// Replaces `old_reviewer_id` with another member of that reviewer's
    /// team, keeping the slot position.
    ///
    /// # Errors
    ///
    /// Returns [`PullRequestLifecycleError::NotFound`] when the pull request
    /// does not exist, [`ReviewDomainError::PullRequestMerged`] once merged,
    /// [`ReviewDomainError::ReviewerNotAssigned`] when the user is not a
    /// current reviewer, or [`AssignmentError::NoCandidate`] when nobody is
    /// eligible. No write happens on any of these failures.
    pub async fn reassign_reviewer(
        &self,
        id: &str,
        old_reviewer_id: &str,
    ) -> PullRequestLifecycleResult<ReviewerReassignment> {
        let pr_id = PullRequestId::new(id)?;
        let old_reviewer = UserId::new(old_reviewer_id)?;
        let mut pull_request = self.find_or_error(pr_id).await?;

        pull_request.ensure_reviewer_replaceable(&old_reviewer)?;
        let new_reviewer = self
            .engine
            .select_replacement(&pull_request, &old_reviewer)
            .await?;
        pull_request.replace_reviewer(&old_reviewer, new_reviewer.clone())?;
        self.pull_requests.update(&pull_request).await?;

        tracing::info!(
            pr_id = %pull_request.id(),
            old_reviewer_id = %old_reviewer,
            new_reviewer_id = %new_reviewer,
            "reviewer reassigned"
        );

        self.audit
            .record(&NewEvent::reviewer_reassigned(
                pull_request.id().clone(),
                old_reviewer,
                new_reviewer.clone(),
                self.clock.utc(),
            ))
            .await;
        Ok(ReviewerReassignment {
            pull_request,
            new_reviewer,
        })
    }

    /// Retrieves a pull request by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PullRequestLifecycleError::NotFound`] when the pull request
    /// does not exist.
    pub async fn get_pull_request(&self, id: &str) -> PullRequestLifecycleResult<PullRequest> {
        let pr_id = PullRequestId::new(id)?;
        self.find_or_error(pr_id).await
    }

    /// Lists the pull requests `user_id` currently reviews, newest first.
    ///
    /// # Errors
    ///
    /// Returns a validation or persistence error.
    pub async fn reviews_for(
        &self,
        user_id: &str,
    ) -> PullRequestLifecycleResult<Vec<PullRequestSummary>> {
        let reviewer = UserId::new(user_id)?;
        let pull_requests = self.pull_requests.list_by_reviewer(&reviewer).await?;
        Ok(pull_requests.iter().map(PullRequest::summary).collect())
    }

    async fn find_or_error(&self, id: PullRequestId) -> PullRequestLifecycleResult<PullRequest> {
        self.pull_requests
            .find_by_id(&id)
            .await?
            .ok_or(PullRequestLifecycleError::NotFound(id))
    }
}
