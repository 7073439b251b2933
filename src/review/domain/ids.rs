//! Identifier types for the review domain.

use super::ReviewDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum identifier length, matching the `VARCHAR(255)` column.
const MAX_IDENTIFIER_LENGTH: usize = 255;

/// Externally assigned pull request identifier (for example `pr-1001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PullRequestId(String);

impl PullRequestId {
    /// Creates a validated pull request identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::EmptyPullRequestId`] when the value is
    /// empty after trimming or [`ReviewDomainError::PullRequestIdTooLong`]
    /// when it exceeds 255 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ReviewDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(ReviewDomainError::EmptyPullRequestId);
        }
        if normalized.chars().count() > MAX_IDENTIFIER_LENGTH {
            return Err(ReviewDomainError::PullRequestIdTooLong(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PullRequestId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PullRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Store-assigned, monotonically increasing audit event identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(i64);

impl EventId {
    /// Wraps a store-assigned identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
