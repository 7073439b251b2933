//! Error types for directory domain validation.

use super::UserId;
use thiserror::Error;

/// Errors returned while constructing directory domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryDomainError {
    /// The user identifier is empty after trimming.
    #[error("user identifier must not be empty")]
    EmptyUserId,

    /// The user identifier exceeds the 255-character storage limit.
    #[error("user identifier exceeds 255 character limit: {0}")]
    UserIdTooLong(String),

    /// The team name is empty after trimming.
    #[error("team name must not be empty")]
    EmptyTeamName,

    /// The team name exceeds the 255-character storage limit.
    #[error("team name exceeds 255 character limit: {0}")]
    TeamNameTooLong(String),

    /// A team member was supplied without a username.
    #[error("username for user {0} must not be empty")]
    EmptyUsername(UserId),

    /// A team member's username exceeds the 255-character storage limit.
    #[error("username for user {0} exceeds 255 character limit")]
    UsernameTooLong(UserId),

    /// The same user was listed twice in one team.
    #[error("user {0} is listed more than once in the team")]
    DuplicateTeamMember(UserId),
}
