//! In-memory repository for teams and users.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::directory::{
    domain::{PersistedUserData, Team, TeamMember, TeamName, User, UserId},
    ports::{DirectoryRepository, DirectoryRepositoryError, DirectoryRepositoryResult},
};

/// Thread-safe in-memory team and user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    state: Arc<RwLock<InMemoryDirectoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    users: HashMap<UserId, User>,
    /// Member identifiers per team, in listing order.
    teams: HashMap<TeamName, Vec<UserId>>,
}

impl InMemoryDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DirectoryRepositoryResult<RwLockReadGuard<'_, InMemoryDirectoryState>> {
        self.state.read().map_err(|err| {
            DirectoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> DirectoryRepositoryResult<RwLockWriteGuard<'_, InMemoryDirectoryState>> {
        self.state.write().map_err(|err| {
            DirectoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn members_of(state: &InMemoryDirectoryState, name: &TeamName) -> Vec<User> {
    state
        .teams
        .get(name)
        .map(|ids| {
            ids.iter()
                .filter_map(|id| state.users.get(id).cloned())
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl DirectoryRepository for InMemoryDirectory {
    async fn create_team(&self, team: &Team) -> DirectoryRepositoryResult<()> {
        let mut state = self.write()?;

        if state.teams.contains_key(team.name()) {
            return Err(DirectoryRepositoryError::DuplicateTeam(team.name().clone()));
        }

        // Validate every member before touching the maps so a rejected team
        // leaves no partial upserts behind.
        for member in team.members() {
            if let Some(current_team) = state
                .users
                .get(member.user_id())
                .and_then(User::team_name)
                && current_team != team.name()
            {
                return Err(DirectoryRepositoryError::MemberOfAnotherTeam {
                    user_id: member.user_id().clone(),
                    team_name: current_team.clone(),
                });
            }
        }

        for user in team.member_users() {
            state.users.insert(user.id().clone(), user);
        }
        let member_ids = team
            .members()
            .iter()
            .map(|member| member.user_id().clone())
            .collect();
        state.teams.insert(team.name().clone(), member_ids);
        Ok(())
    }

    async fn find_team(&self, name: &TeamName) -> DirectoryRepositoryResult<Option<Team>> {
        let state = self.read()?;
        if !state.teams.contains_key(name) {
            return Ok(None);
        }
        let members = members_of(&state, name)
            .iter()
            .map(TeamMember::from_user)
            .collect();
        Team::new(name.clone(), members)
            .map(Some)
            .map_err(DirectoryRepositoryError::invalid_persisted_data)
    }

    async fn team_exists(&self, name: &TeamName) -> DirectoryRepositoryResult<bool> {
        let state = self.read()?;
        Ok(state.teams.contains_key(name))
    }

    async fn find_user(&self, id: &UserId) -> DirectoryRepositoryResult<Option<User>> {
        let state = self.read()?;
        Ok(state.users.get(id).cloned())
    }

    async fn list_team_members(&self, name: &TeamName) -> DirectoryRepositoryResult<Vec<User>> {
        let state = self.read()?;
        Ok(members_of(&state, name))
    }

    async fn update_user(&self, user: &User) -> DirectoryRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .users
            .get_mut(user.id())
            .ok_or_else(|| DirectoryRepositoryError::UserNotFound(user.id().clone()))?;

        // Membership is owned by team creation, so the stored team wins.
        *stored = User::from_persisted(PersistedUserData {
            id: user.id().clone(),
            username: user.username().to_owned(),
            team_name: stored.team_name().cloned(),
            is_active: user.is_active(),
        });
        Ok(())
    }
}
