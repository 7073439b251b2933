//! Repository port for team and user persistence.

use crate::directory::domain::{Team, TeamName, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory repository operations.
pub type DirectoryRepositoryResult<T> = Result<T, DirectoryRepositoryError>;

/// Team and user persistence contract.
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// Stores a new team, upserting every listed member as a user and
    /// recording their membership. All writes commit together or not at all.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::DuplicateTeam`] when the name is
    /// taken or [`DirectoryRepositoryError::MemberOfAnotherTeam`] when a
    /// listed user already belongs to a different team.
    async fn create_team(&self, team: &Team) -> DirectoryRepositoryResult<()>;

    /// Finds a team and its members by name.
    ///
    /// Returns `None` when no team has the given name.
    async fn find_team(&self, name: &TeamName) -> DirectoryRepositoryResult<Option<Team>>;

    /// Returns whether a team with the given name exists.
    async fn team_exists(&self, name: &TeamName) -> DirectoryRepositoryResult<bool>;

    /// Finds a user, including the team they belong to, by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_user(&self, id: &UserId) -> DirectoryRepositoryResult<Option<User>>;

    /// Returns every member of the team, active or not.
    ///
    /// Returns an empty list when the team has no members or does not exist.
    async fn list_team_members(&self, name: &TeamName) -> DirectoryRepositoryResult<Vec<User>>;

    /// Persists the mutable fields (display name, active flag) of a user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::UserNotFound`] when the user does
    /// not exist.
    async fn update_user(&self, user: &User) -> DirectoryRepositoryResult<()>;
}

/// Errors returned by directory repository implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryRepositoryError {
    /// A team with the same name already exists.
    #[error("duplicate team name: {0}")]
    DuplicateTeam(TeamName),

    /// A listed user already belongs to a different team.
    #[error("user {user_id} already belongs to team {team_name}")]
    MemberOfAnotherTeam {
        /// The user that is already placed.
        user_id: UserId,
        /// The team the user currently belongs to.
        team_name: TeamName,
    },

    /// The user was not found.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<diesel::result::Error> for DirectoryRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}
