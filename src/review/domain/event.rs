//! Append-only audit events produced by the review lifecycle.
//!
//! Each kind carries its own payload struct. Payloads are serialized to
//! JSON only at the store boundary; the lifecycle never reads them back.

use super::{EventId, ParseEventKindError, PullRequest, PullRequestId};
use crate::directory::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Audit event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A pull request was opened.
    PrCreated,
    /// A pull request was merged.
    PrMerged,
    /// A reviewer was assigned when the pull request was opened.
    ReviewerAssigned,
    /// A reviewer was replaced by another team member.
    ReviewerReassigned,
    /// A reviewer was removed without replacement.
    ReviewerUnassigned,
}

impl EventKind {
    /// Every known event kind, in storage order.
    pub const ALL: [Self; 5] = [
        Self::PrCreated,
        Self::PrMerged,
        Self::ReviewerAssigned,
        Self::ReviewerReassigned,
        Self::ReviewerUnassigned,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PrCreated => "pr_created",
            Self::PrMerged => "pr_merged",
            Self::ReviewerAssigned => "reviewer_assigned",
            Self::ReviewerReassigned => "reviewer_reassigned",
            Self::ReviewerUnassigned => "reviewer_unassigned",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EventKind {
    type Error = ParseEventKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value.trim())
            .ok_or_else(|| ParseEventKindError(value.to_owned()))
    }
}

/// Payload of a [`EventKind::PrCreated`] event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrCreatedData {
    /// Name of the pull request at creation.
    pub pr_name: String,
    /// When the pull request was opened.
    pub created_at: DateTime<Utc>,
}

/// Payload of a [`EventKind::PrMerged`] event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrMergedData {
    /// When the pull request was merged.
    pub merged_at: DateTime<Utc>,
}

/// Payload of a [`EventKind::ReviewerAssigned`] event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewerAssignedData {
    /// When the reviewer was assigned.
    pub assigned_at: DateTime<Utc>,
}

/// Payload of a [`EventKind::ReviewerReassigned`] event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewerReassignedData {
    /// Reviewer that was removed.
    pub old_user_id: UserId,
    /// Reviewer that took the freed slot.
    pub new_user_id: UserId,
    /// When the replacement happened.
    pub reassigned_at: DateTime<Utc>,
}

/// Payload of a [`EventKind::ReviewerUnassigned`] event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewerUnassignedData {
    /// When the reviewer was removed.
    pub unassigned_at: DateTime<Utc>,
}

/// Kind-specific event payload.
///
/// Serializes adjacently tagged as `{"event_type": ..., "additional_data":
/// {...}}`, which mirrors the column layout of the event store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", content = "additional_data", rename_all = "snake_case")]
pub enum EventPayload {
    /// See [`PrCreatedData`].
    PrCreated(PrCreatedData),
    /// See [`PrMergedData`].
    PrMerged(PrMergedData),
    /// See [`ReviewerAssignedData`].
    ReviewerAssigned(ReviewerAssignedData),
    /// See [`ReviewerReassignedData`].
    ReviewerReassigned(ReviewerReassignedData),
    /// See [`ReviewerUnassignedData`].
    ReviewerUnassigned(ReviewerUnassignedData),
}

impl EventPayload {
    /// Returns the event kind this payload belongs to.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::PrCreated(_) => EventKind::PrCreated,
            Self::PrMerged(_) => EventKind::PrMerged,
            Self::ReviewerAssigned(_) => EventKind::ReviewerAssigned,
            Self::ReviewerReassigned(_) => EventKind::ReviewerReassigned,
            Self::ReviewerUnassigned(_) => EventKind::ReviewerUnassigned,
        }
    }

    /// Serializes only the kind-specific data, as stored in the
    /// `additional_data` column.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the payload cannot be encoded.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Self::PrCreated(data) => serde_json::to_value(data),
            Self::PrMerged(data) => serde_json::to_value(data),
            Self::ReviewerAssigned(data) => serde_json::to_value(data),
            Self::ReviewerReassigned(data) => serde_json::to_value(data),
            Self::ReviewerUnassigned(data) => serde_json::to_value(data),
        }
    }

    /// Decodes the stored `additional_data` for the given kind.
    ///
    /// # Errors
    ///
    /// Returns a deserialization error when `value` does not match the
    /// payload shape of `kind`.
    pub fn from_json(kind: EventKind, value: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            EventKind::PrCreated => Self::PrCreated(serde_json::from_value(value)?),
            EventKind::PrMerged => Self::PrMerged(serde_json::from_value(value)?),
            EventKind::ReviewerAssigned => Self::ReviewerAssigned(serde_json::from_value(value)?),
            EventKind::ReviewerReassigned => {
                Self::ReviewerReassigned(serde_json::from_value(value)?)
            }
            EventKind::ReviewerUnassigned => {
                Self::ReviewerUnassigned(serde_json::from_value(value)?)
            }
        })
    }
}

/// An event ready to be appended to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pull_request_id: PullRequestId,
    user_id: UserId,
    payload: EventPayload,
    occurred_at: DateTime<Utc>,
}

impl NewEvent {
    /// Describes the opening of `pull_request`; the subject is the author.
    #[must_use]
    pub fn pr_created(pull_request: &PullRequest) -> Self {
        let created_at = pull_request.created_at();
        Self {
            pull_request_id: pull_request.id().clone(),
            user_id: pull_request.author_id().clone(),
            payload: EventPayload::PrCreated(PrCreatedData {
                pr_name: pull_request.name().to_owned(),
                created_at,
            }),
            occurred_at: created_at,
        }
    }

    /// Describes the initial assignment of `reviewer_id` to `pull_request`.
    #[must_use]
    pub fn reviewer_assigned(pull_request: &PullRequest, reviewer_id: &UserId) -> Self {
        let assigned_at = pull_request.created_at();
        Self {
            pull_request_id: pull_request.id().clone(),
            user_id: reviewer_id.clone(),
            payload: EventPayload::ReviewerAssigned(ReviewerAssignedData { assigned_at }),
            occurred_at: assigned_at,
        }
    }

    /// Describes a merge; the subject is the author.
    #[must_use]
    pub fn pr_merged(pull_request: &PullRequest, merged_at: DateTime<Utc>) -> Self {
        Self {
            pull_request_id: pull_request.id().clone(),
            user_id: pull_request.author_id().clone(),
            payload: EventPayload::PrMerged(PrMergedData { merged_at }),
            occurred_at: merged_at,
        }
    }

    /// Describes a reviewer replacement; the subject is the new reviewer.
    #[must_use]
    pub fn reviewer_reassigned(
        pull_request_id: PullRequestId,
        old_reviewer: UserId,
        new_reviewer: UserId,
        reassigned_at: DateTime<Utc>,
    ) -> Self {
        Self {
            pull_request_id,
            user_id: new_reviewer.clone(),
            payload: EventPayload::ReviewerReassigned(ReviewerReassignedData {
                old_user_id: old_reviewer,
                new_user_id: new_reviewer,
                reassigned_at,
            }),
            occurred_at: reassigned_at,
        }
    }

    /// Describes removal of a reviewer without replacement.
    #[must_use]
    pub fn reviewer_unassigned(
        pull_request_id: PullRequestId,
        reviewer_id: UserId,
        unassigned_at: DateTime<Utc>,
    ) -> Self {
        Self {
            pull_request_id,
            user_id: reviewer_id,
            payload: EventPayload::ReviewerUnassigned(ReviewerUnassignedData { unassigned_at }),
            occurred_at: unassigned_at,
        }
    }

    /// Returns the event kind.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    /// Returns the associated pull request.
    #[must_use]
    pub const fn pull_request_id(&self) -> &PullRequestId {
        &self.pull_request_id
    }

    /// Returns the subject user.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the kind-specific payload.
    #[must_use]
    pub const fn payload(&self) -> &EventPayload {
        &self.payload
    }

    /// Returns when the described occurrence happened.
    #[must_use]
    pub const fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// Attaches the store-assigned identifier.
    #[must_use]
    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            pull_request_id: self.pull_request_id,
            user_id: self.user_id,
            payload: self.payload,
            created_at: self.occurred_at,
        }
    }
}

/// A recorded audit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    id: EventId,
    pull_request_id: PullRequestId,
    user_id: UserId,
    payload: EventPayload,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedEventData {
    /// Store-assigned identifier.
    pub id: EventId,
    /// Associated pull request.
    pub pull_request_id: PullRequestId,
    /// Subject user.
    pub user_id: UserId,
    /// Decoded payload.
    pub payload: EventPayload,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Reconstructs an event from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedEventData) -> Self {
        Self {
            id: data.id,
            pull_request_id: data.pull_request_id,
            user_id: data.user_id,
            payload: data.payload,
            created_at: data.created_at,
        }
    }

    /// Returns the store-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> EventId {
        self.id
    }

    /// Returns the event kind.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    /// Returns the associated pull request.
    #[must_use]
    pub const fn pull_request_id(&self) -> &PullRequestId {
        &self.pull_request_id
    }

    /// Returns the subject user.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the kind-specific payload.
    #[must_use]
    pub const fn payload(&self) -> &EventPayload {
        &self.payload
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
