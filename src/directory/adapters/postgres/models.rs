//! Diesel row models for directory persistence.

use super::schema::{team_members, teams, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: String,
    /// Display name.
    pub username: String,
    /// Active flag.
    pub is_active: bool,
}

/// Insert/upsert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// User identifier.
    pub id: String,
    /// Display name.
    pub username: String,
    /// Active flag.
    pub is_active: bool,
    /// Creation timestamp, ignored on conflict.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for team records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = teams)]
pub struct NewTeamRow {
    /// Unique team name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Membership row linking a user to a team.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = team_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TeamMemberRow {
    /// Member user identifier.
    pub user_id: String,
    /// Owning team name.
    pub team_name: String,
    /// Listing order within the team.
    pub position: i32,
}
