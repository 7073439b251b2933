//! User records tracked by the directory.

use super::{TeamName, UserId};
use serde::{Deserialize, Serialize};

/// A user known to the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    team_name: Option<TeamName>,
    is_active: bool,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted display name.
    pub username: String,
    /// Team the user belongs to, if any.
    pub team_name: Option<TeamName>,
    /// Persisted active flag.
    pub is_active: bool,
}

impl User {
    /// Creates a user that does not yet belong to a team.
    #[must_use]
    pub fn new(id: UserId, username: impl Into<String>, is_active: bool) -> Self {
        Self {
            id,
            username: username.into(),
            team_name: None,
            is_active,
        }
    }

    /// Places the user in the given team.
    #[must_use]
    pub fn with_team(mut self, team_name: TeamName) -> Self {
        self.team_name = Some(team_name);
        self
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            username: data.username,
            team_name: data.team_name,
            is_active: data.is_active,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the team the user belongs to, if any.
    #[must_use]
    pub const fn team_name(&self) -> Option<&TeamName> {
        self.team_name.as_ref()
    }

    /// Returns whether the user may currently be chosen as a reviewer.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Sets the active flag.
    pub const fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }
}
