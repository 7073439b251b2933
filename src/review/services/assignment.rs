//! Reviewer selection.
//!
//! Selection reads team membership from the directory and draws from a
//! random source owned by the engine. Inject a seeded generator with
//! [`ReviewerAssignmentEngine::with_rng`] to make choices reproducible.

use crate::directory::{
    domain::{TeamName, User, UserId},
    ports::{DirectoryRepository, DirectoryRepositoryError},
};
use crate::review::domain::{MAX_REVIEWERS, PullRequest, PullRequestId};
use mockable::Clock;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Errors returned by reviewer selection.
#[derive(Debug, Clone, Error)]
pub enum AssignmentError {
    /// No eligible user can replace the outgoing reviewer.
    #[error("no replacement candidate for reviewer {reviewer_id} on pull request {pull_request_id}")]
    NoCandidate {
        /// Pull request whose reviewer was being replaced.
        pull_request_id: PullRequestId,
        /// The outgoing reviewer.
        reviewer_id: UserId,
    },

    /// Directory lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryRepositoryError),
}

/// Result type for reviewer selection.
pub type AssignmentResult<T> = Result<T, AssignmentError>;

/// Chooses initial reviewers and replacement reviewers.
pub struct ReviewerAssignmentEngine<D>
where
    D: DirectoryRepository,
{
    directory: Arc<D>,
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl<D> ReviewerAssignmentEngine<D>
where
    D: DirectoryRepository,
{
    /// Creates an engine whose generator is seeded from the clock.
    #[must_use]
    pub fn new(directory: Arc<D>, clock: &impl Clock) -> Self {
        let seed = clock
            .utc()
            .timestamp_nanos_opt()
            .unwrap_or_default()
            .unsigned_abs();
        Self::with_rng(directory, StdRng::seed_from_u64(seed))
    }

    /// Creates an engine that draws from the supplied generator.
    #[must_use]
    pub fn with_rng(directory: Arc<D>, rng: impl RngCore + Send + 'static) -> Self {
        Self {
            directory,
            rng: Mutex::new(Box::new(rng)),
        }
    }

    /// Picks up to [`MAX_REVIEWERS`] distinct active members of `team_name`,
    /// never the author. An empty result is valid.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::Directory`] when the member lookup fails.
    pub async fn select_initial_reviewers(
        &self,
        team_name: &TeamName,
        author_id: &UserId,
    ) -> AssignmentResult<Vec<UserId>> {
        let members = self.directory.list_team_members(team_name).await?;
        let mut candidates = initial_candidates(&members, author_id);

        candidates.shuffle(&mut **self.lock_rng());
        candidates.truncate(MAX_REVIEWERS);
        Ok(candidates)
    }

    /// Picks one user to replace `old_reviewer` on `pull_request`.
    ///
    /// Candidates come from the outgoing reviewer's team, must be active,
    /// and must not be the author or anyone already reviewing.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::NoCandidate`] when the outgoing reviewer
    /// has no team or nobody in it is eligible, and
    /// [`AssignmentError::Directory`] when a lookup fails.
    pub async fn select_replacement(
        &self,
        pull_request: &PullRequest,
        old_reviewer: &UserId,
    ) -> AssignmentResult<UserId> {
        let no_candidate = || AssignmentError::NoCandidate {
            pull_request_id: pull_request.id().clone(),
            reviewer_id: old_reviewer.clone(),
        };

        let reviewer = self.directory.find_user(old_reviewer).await?;
        let Some(team_name) = reviewer.as_ref().and_then(User::team_name) else {
            return Err(no_candidate());
        };

        let members = self.directory.list_team_members(team_name).await?;
        let candidates = replacement_candidates(&members, pull_request, old_reviewer);
        candidates
            .choose(&mut **self.lock_rng())
            .cloned()
            .ok_or_else(no_candidate)
    }

    fn lock_rng(&self) -> MutexGuard<'_, Box<dyn RngCore + Send>> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Active members other than the author, in listing order.
#[must_use]
pub fn initial_candidates(members: &[User], author_id: &UserId) -> Vec<UserId> {
    members
        .iter()
        .filter(|user| user.is_active() && user.id() != author_id)
        .map(|user| user.id().clone())
        .collect()
}

/// Active members eligible to replace `old_reviewer`, in listing order.
#[must_use]
pub fn replacement_candidates(
    members: &[User],
    pull_request: &PullRequest,
    old_reviewer: &UserId,
) -> Vec<UserId> {
    members
        .iter()
        .filter(|user| {
            user.is_active()
                && user.id() != pull_request.author_id()
                && user.id() != old_reviewer
                && !pull_request.is_reviewer(user.id())
        })
        .map(|user| user.id().clone())
        .collect()
}
