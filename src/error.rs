//! Crate-wide error classification.
//!
//! Each service error exposes a `kind()` accessor returning [`ErrorKind`], so
//! a boundary layer can map failures onto distinct responses without
//! matching on every concrete variant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification of service failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A create operation collided with an existing record.
    AlreadyExists,
    /// The referenced pull request, team, or user does not exist.
    NotFound,
    /// The operation is invalid for the current state of the record.
    Conflict,
    /// The referenced reviewer is not currently assigned.
    InvalidState,
    /// No eligible replacement reviewer remains.
    NoCandidate,
    /// Caller-supplied input failed validation.
    InvalidInput,
    /// Store or transport failure.
    Unexpected,
}

impl ErrorKind {
    /// Returns the canonical machine-readable code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AlreadyExists => "already_exists",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::InvalidState => "invalid_state",
            Self::NoCandidate => "no_candidate",
            Self::InvalidInput => "invalid_input",
            Self::Unexpected => "unexpected",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
