//! Diesel row models for review persistence.

use super::schema::{events, pr_reviewers, pull_requests};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result and insert model for pull request records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = pull_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PullRequestRow {
    /// Pull request identifier.
    pub id: String,
    /// Pull request name.
    pub name: String,
    /// Author user identifier.
    pub author_id: String,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Merge timestamp.
    pub merged_at: Option<DateTime<Utc>>,
}

/// Reviewer link row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = pr_reviewers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReviewerRow {
    /// Owning pull request identifier.
    pub pr_id: String,
    /// Reviewer user identifier.
    pub user_id: String,
    /// Slot index within the reviewer list.
    pub position: i32,
}

/// Insert model for audit events; the identifier is assigned by the store.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = events)]
pub struct NewEventRow {
    /// Event kind.
    pub event_type: String,
    /// Associated pull request identifier.
    pub pr_id: String,
    /// Subject user identifier.
    pub user_id: String,
    /// Kind-specific JSON payload.
    pub additional_data: serde_json::Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for audit events.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EventRow {
    /// Sequential event identifier.
    pub id: i64,
    /// Event kind.
    pub event_type: String,
    /// Associated pull request identifier.
    pub pr_id: String,
    /// Subject user identifier.
    pub user_id: String,
    /// Kind-specific JSON payload.
    pub additional_data: serde_json::Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
