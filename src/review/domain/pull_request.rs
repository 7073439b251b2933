//! Pull request aggregate root and its review state machine.

use super::{ParsePullRequestStatusError, PullRequestId, ReviewDomainError};
use crate::directory::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Number of reviewers chosen when a pull request is opened.
pub const MAX_REVIEWERS: usize = 2;

/// Maximum pull request name length, matching the `VARCHAR(255)` column.
const MAX_NAME_LENGTH: usize = 255;

/// Pull request lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestStatus {
    /// Under review; reviewers may change.
    Open,
    /// Merged; the reviewer set is frozen.
    Merged,
}

impl PullRequestStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
        }
    }
}

impl fmt::Display for PullRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for PullRequestStatus {
    type Error = ParsePullRequestStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "OPEN" => Ok(Self::Open),
            "MERGED" => Ok(Self::Merged),
            _ => Err(ParsePullRequestStatusError(value.to_owned())),
        }
    }
}

/// Result of asking a pull request to merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The pull request moved from open to merged.
    Merged {
        /// When the merge took effect.
        merged_at: DateTime<Utc>,
    },
    /// The pull request was already merged; nothing changed.
    AlreadyMerged,
}

/// Pull request aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    id: PullRequestId,
    name: String,
    author_id: UserId,
    status: PullRequestStatus,
    reviewers: Vec<UserId>,
    created_at: DateTime<Utc>,
    merged_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedPullRequestData {
    /// Persisted pull request identifier.
    pub id: PullRequestId,
    /// Persisted pull request name.
    pub name: String,
    /// Persisted author identifier.
    pub author_id: UserId,
    /// Persisted lifecycle status.
    pub status: PullRequestStatus,
    /// Persisted reviewers in assignment order.
    pub reviewers: Vec<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted merge timestamp, present only when merged.
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    /// Opens a new pull request with the given reviewer set.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::EmptyPullRequestName`] when the name is
    /// blank, [`ReviewDomainError::PullRequestNameTooLong`] when it exceeds
    /// 255 characters, or a reviewer-set error when the set exceeds
    /// [`MAX_REVIEWERS`], repeats a user, or contains the author.
    pub fn open(
        id: PullRequestId,
        name: impl Into<String>,
        author_id: UserId,
        reviewers: Vec<UserId>,
        clock: &impl Clock,
    ) -> Result<Self, ReviewDomainError> {
        let raw_name = name.into();
        let trimmed = raw_name.trim();
        if trimmed.is_empty() {
            return Err(ReviewDomainError::EmptyPullRequestName);
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(ReviewDomainError::PullRequestNameTooLong);
        }
        validate_reviewers(&author_id, &reviewers)?;

        Ok(Self {
            id,
            name: trimmed.to_owned(),
            author_id,
            status: PullRequestStatus::Open,
            reviewers,
            created_at: clock.utc(),
            merged_at: None,
        })
    }

    /// Reconstructs a pull request from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedPullRequestData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            author_id: data.author_id,
            status: data.status,
            reviewers: data.reviewers,
            created_at: data.created_at,
            merged_at: data.merged_at,
        }
    }

    /// Returns the pull request identifier.
    #[must_use]
    pub const fn id(&self) -> &PullRequestId {
        &self.id
    }

    /// Returns the pull request name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the author identifier.
    #[must_use]
    pub const fn author_id(&self) -> &UserId {
        &self.author_id
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> PullRequestStatus {
        self.status
    }

    /// Returns the assigned reviewers in assignment order.
    #[must_use]
    pub fn reviewers(&self) -> &[UserId] {
        &self.reviewers
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the merge timestamp, present only once merged.
    #[must_use]
    pub const fn merged_at(&self) -> Option<DateTime<Utc>> {
        self.merged_at
    }

    /// Returns whether the pull request has been merged.
    #[must_use]
    pub fn is_merged(&self) -> bool {
        self.status == PullRequestStatus::Merged
    }

    /// Returns whether `user_id` is currently a reviewer.
    #[must_use]
    pub fn is_reviewer(&self, user_id: &UserId) -> bool {
        self.reviewers.contains(user_id)
    }

    /// Returns a short listing view of this pull request.
    #[must_use]
    pub fn summary(&self) -> PullRequestSummary {
        PullRequestSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            author_id: self.author_id.clone(),
            status: self.status,
        }
    }

    /// Merges the pull request. Merging twice is a no-op.
    pub fn merge(&mut self, clock: &impl Clock) -> MergeOutcome {
        if self.is_merged() {
            return MergeOutcome::AlreadyMerged;
        }
        let merged_at = clock.utc();
        self.status = PullRequestStatus::Merged;
        self.merged_at = Some(merged_at);
        MergeOutcome::Merged { merged_at }
    }

    /// Checks that `reviewer_id` may be replaced right now.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::PullRequestMerged`] once merged, or
    /// [`ReviewDomainError::ReviewerNotAssigned`] when `reviewer_id` is not a
    /// current reviewer.
    pub fn ensure_reviewer_replaceable(&self, reviewer_id: &UserId) -> Result<(), ReviewDomainError> {
        if self.is_merged() {
            return Err(ReviewDomainError::PullRequestMerged(self.id.clone()));
        }
        if !self.is_reviewer(reviewer_id) {
            return Err(ReviewDomainError::ReviewerNotAssigned {
                pull_request_id: self.id.clone(),
                reviewer_id: reviewer_id.clone(),
            });
        }
        Ok(())
    }

    /// Replaces `old_reviewer` with `new_reviewer`, keeping its position in
    /// the reviewer list.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::ensure_reviewer_replaceable`], plus
    /// [`ReviewDomainError::AuthorAssignedAsReviewer`] or
    /// [`ReviewDomainError::DuplicateReviewer`] when `new_reviewer` is not
    /// eligible.
    pub fn replace_reviewer(
        &mut self,
        old_reviewer: &UserId,
        new_reviewer: UserId,
    ) -> Result<(), ReviewDomainError> {
        self.ensure_reviewer_replaceable(old_reviewer)?;
        if new_reviewer == self.author_id {
            return Err(ReviewDomainError::AuthorAssignedAsReviewer(new_reviewer));
        }
        if self.is_reviewer(&new_reviewer) {
            return Err(ReviewDomainError::DuplicateReviewer(new_reviewer));
        }

        if let Some(slot) = self
            .reviewers
            .iter_mut()
            .find(|reviewer| *reviewer == old_reviewer)
        {
            *slot = new_reviewer;
        }
        Ok(())
    }
}

fn validate_reviewers(author_id: &UserId, reviewers: &[UserId]) -> Result<(), ReviewDomainError> {
    if reviewers.len() > MAX_REVIEWERS {
        return Err(ReviewDomainError::TooManyReviewers(reviewers.len()));
    }
    let mut seen = HashSet::with_capacity(reviewers.len());
    for reviewer in reviewers {
        if reviewer == author_id {
            return Err(ReviewDomainError::AuthorAssignedAsReviewer(reviewer.clone()));
        }
        if !seen.insert(reviewer) {
            return Err(ReviewDomainError::DuplicateReviewer(reviewer.clone()));
        }
    }
    Ok(())
}

/// Short listing view of a pull request, used for review queues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestSummary {
    /// Pull request identifier.
    pub id: PullRequestId,
    /// Pull request name.
    pub name: String,
    /// Author identifier.
    pub author_id: UserId,
    /// Lifecycle status.
    pub status: PullRequestStatus,
}
