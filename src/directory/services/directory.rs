//! Service layer for team creation, lookup, and user activation.

use crate::directory::{
    domain::{DirectoryDomainError, Team, TeamMember, TeamName, User, UserId},
    ports::{DirectoryRepository, DirectoryRepositoryError},
};
use crate::error::ErrorKind;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a team together with its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTeamRequest {
    team_name: String,
    members: Vec<(String, String, bool)>,
}

impl CreateTeamRequest {
    /// Creates a request for a team with no members yet.
    #[must_use]
    pub fn new(team_name: impl Into<String>) -> Self {
        Self {
            team_name: team_name.into(),
            members: Vec::new(),
        }
    }

    /// Adds a member to the team.
    #[must_use]
    pub fn with_member(
        mut self,
        user_id: impl Into<String>,
        username: impl Into<String>,
        is_active: bool,
    ) -> Self {
        self.members
            .push((user_id.into(), username.into(), is_active));
        self
    }
}

/// Service-level errors for directory operations.
#[derive(Debug, Error)]
pub enum DirectoryServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] DirectoryDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] DirectoryRepositoryError),
    /// A team with the requested name already exists.
    #[error("team already exists: {0}")]
    TeamAlreadyExists(TeamName),
    /// The requested team does not exist.
    #[error("team not found: {0}")]
    TeamNotFound(TeamName),
    /// The requested user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
}

impl DirectoryServiceError {
    /// Classifies the error for boundary-layer mapping.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::InvalidInput,
            Self::TeamAlreadyExists(_)
            | Self::Repository(DirectoryRepositoryError::DuplicateTeam(_)) => {
                ErrorKind::AlreadyExists
            }
            Self::Repository(DirectoryRepositoryError::MemberOfAnotherTeam { .. }) => {
                ErrorKind::Conflict
            }
            Self::TeamNotFound(_)
            | Self::UserNotFound(_)
            | Self::Repository(DirectoryRepositoryError::UserNotFound(_)) => ErrorKind::NotFound,
            Self::Repository(
                DirectoryRepositoryError::InvalidPersistedData(_)
                | DirectoryRepositoryError::Persistence(_),
            ) => ErrorKind::Unexpected,
        }
    }
}

/// Result type for directory service operations.
pub type DirectoryServiceResult<T> = Result<T, DirectoryServiceError>;

/// Team onboarding and user management service.
#[derive(Clone)]
pub struct TeamDirectoryService<R>
where
    R: DirectoryRepository,
{
    repository: Arc<R>,
}

impl<R> TeamDirectoryService<R>
where
    R: DirectoryRepository,
{
    /// Creates a new directory service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a team and upserts every listed member as a user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::TeamAlreadyExists`] when the name is
    /// taken, [`DirectoryServiceError::Domain`] when input validation fails,
    /// or [`DirectoryServiceError::Repository`] when a member already belongs
    /// to another team or persistence fails.
    pub async fn create_team(&self, request: CreateTeamRequest) -> DirectoryServiceResult<Team> {
        let CreateTeamRequest { team_name, members } = request;
        let name = TeamName::new(team_name)?;
        let members = members
            .into_iter()
            .map(|(user_id, username, is_active)| {
                TeamMember::new(UserId::new(user_id)?, username, is_active)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let team = Team::new(name, members)?;

        if self.repository.team_exists(team.name()).await? {
            return Err(DirectoryServiceError::TeamAlreadyExists(team.name().clone()));
        }

        self.repository.create_team(&team).await?;
        tracing::info!(
            team_name = %team.name(),
            member_count = team.members().len(),
            "team created"
        );
        Ok(team)
    }

    /// Retrieves a team and its members.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::TeamNotFound`] when no team has the
    /// given name.
    pub async fn get_team(&self, name: &str) -> DirectoryServiceResult<Team> {
        let team_name = TeamName::new(name)?;
        self.repository
            .find_team(&team_name)
            .await?
            .ok_or(DirectoryServiceError::TeamNotFound(team_name))
    }

    /// Retrieves a user, including the team they belong to.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::UserNotFound`] when no user has the
    /// given identifier.
    pub async fn get_user(&self, id: &str) -> DirectoryServiceResult<User> {
        let user_id = UserId::new(id)?;
        self.find_user_or_error(user_id).await
    }

    /// Activates or deactivates a user. Inactive users are never chosen as
    /// reviewers.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::UserNotFound`] when no user has the
    /// given identifier.
    pub async fn set_user_active(&self, id: &str, is_active: bool) -> DirectoryServiceResult<User> {
        let user_id = UserId::new(id)?;
        let mut user = self.find_user_or_error(user_id).await?;
        user.set_active(is_active);
        self.repository.update_user(&user).await?;
        tracing::info!(user_id = %user.id(), is_active, "user activity updated");
        Ok(user)
    }

    async fn find_user_or_error(&self, user_id: UserId) -> DirectoryServiceResult<User> {
        self.repository
            .find_user(&user_id)
            .await?
            .ok_or(DirectoryServiceError::UserNotFound(user_id))
    }
}
