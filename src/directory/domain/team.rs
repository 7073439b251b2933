//! Team aggregate and its member listing.

use super::{DirectoryDomainError, TeamName, User, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Maximum username length, matching the `VARCHAR(255)` column.
const MAX_USERNAME_LENGTH: usize = 255;

/// A member entry as supplied when creating a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    user_id: UserId,
    username: String,
    is_active: bool,
}

impl TeamMember {
    /// Creates a validated team member entry.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyUsername`] when the username is
    /// empty after trimming or [`DirectoryDomainError::UsernameTooLong`] when
    /// it exceeds 255 characters.
    pub fn new(
        user_id: UserId,
        username: impl Into<String>,
        is_active: bool,
    ) -> Result<Self, DirectoryDomainError> {
        let raw = username.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DirectoryDomainError::EmptyUsername(user_id));
        }
        if trimmed.chars().count() > MAX_USERNAME_LENGTH {
            return Err(DirectoryDomainError::UsernameTooLong(user_id));
        }
        Ok(Self {
            user_id,
            username: trimmed.to_owned(),
            is_active,
        })
    }

    /// Builds a member entry from an existing user record.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id().clone(),
            username: user.username().to_owned(),
            is_active: user.is_active(),
        }
    }

    /// Returns the member's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the member's display name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the member's active flag.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Converts the entry into the user record it upserts for `team`.
    #[must_use]
    pub fn to_user(&self, team: &TeamName) -> User {
        User::new(self.user_id.clone(), self.username.clone(), self.is_active)
            .with_team(team.clone())
    }
}

/// Team aggregate root: a unique name and its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    name: TeamName,
    members: Vec<TeamMember>,
}

impl Team {
    /// Creates a team from a validated member list.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::DuplicateTeamMember`] when a user is
    /// listed more than once.
    pub fn new(name: TeamName, members: Vec<TeamMember>) -> Result<Self, DirectoryDomainError> {
        let mut seen = HashSet::with_capacity(members.len());
        for member in &members {
            if !seen.insert(member.user_id()) {
                return Err(DirectoryDomainError::DuplicateTeamMember(
                    member.user_id().clone(),
                ));
            }
        }
        Ok(Self { name, members })
    }

    /// Returns the team name.
    #[must_use]
    pub const fn name(&self) -> &TeamName {
        &self.name
    }

    /// Returns the team members in listing order.
    #[must_use]
    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    /// Returns the user records this team upserts on creation.
    #[must_use]
    pub fn member_users(&self) -> Vec<User> {
        self.members
            .iter()
            .map(|member| member.to_user(&self.name))
            .collect()
    }
}
