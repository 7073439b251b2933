//! Validated identifier types for the directory domain.

use super::DirectoryDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum identifier length, matching the `VARCHAR(255)` columns.
const MAX_IDENTIFIER_LENGTH: usize = 255;

/// Externally assigned user identifier (for example `u1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a validated user identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyUserId`] when the value is empty
    /// after trimming or [`DirectoryDomainError::UserIdTooLong`] when it
    /// exceeds 255 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, DirectoryDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(DirectoryDomainError::EmptyUserId);
        }
        if normalized.chars().count() > MAX_IDENTIFIER_LENGTH {
            return Err(DirectoryDomainError::UserIdTooLong(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Globally unique team name, which doubles as the team's primary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamName(String);

impl TeamName {
    /// Creates a validated team name.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyTeamName`] when the value is
    /// empty after trimming or [`DirectoryDomainError::TeamNameTooLong`] when
    /// it exceeds 255 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, DirectoryDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(DirectoryDomainError::EmptyTeamName);
        }
        if normalized.chars().count() > MAX_IDENTIFIER_LENGTH {
            return Err(DirectoryDomainError::TeamNameTooLong(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the team name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TeamName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
