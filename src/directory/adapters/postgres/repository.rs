//! `PostgreSQL` repository implementation for teams and users.

use super::{
    models::{NewTeamRow, NewUserRow, TeamMemberRow, UserRow},
    schema::{team_members, teams, users},
};
use crate::db::PgPool;
use crate::directory::{
    domain::{PersistedUserData, Team, TeamMember, TeamName, User, UserId},
    ports::{DirectoryRepository, DirectoryRepositoryError, DirectoryRepositoryResult},
};
use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::upsert::excluded;
use std::collections::HashMap;

/// `PostgreSQL`-backed team and user directory.
#[derive(Debug, Clone)]
pub struct PostgresDirectory {
    pool: PgPool,
}

impl PostgresDirectory {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> DirectoryRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DirectoryRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(DirectoryRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(DirectoryRepositoryError::persistence)?
    }
}

#[async_trait]
impl DirectoryRepository for PostgresDirectory {
    async fn create_team(&self, team: &Team) -> DirectoryRepositoryResult<()> {
        let team_name = team.name().clone();
        let user_rows = to_new_user_rows(team);
        let member_rows = to_member_rows(team)?;

        self.run_blocking(move |connection| {
            connection.transaction::<_, DirectoryRepositoryError, _>(|tx| {
                if team_exists(tx, &team_name)? {
                    return Err(DirectoryRepositoryError::DuplicateTeam(team_name.clone()));
                }
                for member in &member_rows {
                    reject_foreign_membership(tx, &member.user_id, &team_name)?;
                }

                diesel::insert_into(teams::table)
                    .values(&NewTeamRow {
                        name: team_name.as_str().to_owned(),
                        created_at: Utc::now(),
                    })
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            DirectoryRepositoryError::DuplicateTeam(team_name.clone())
                        }
                        _ => DirectoryRepositoryError::persistence(err),
                    })?;

                if user_rows.is_empty() {
                    return Ok(());
                }

                diesel::insert_into(users::table)
                    .values(&user_rows)
                    .on_conflict(users::id)
                    .do_update()
                    .set((
                        users::username.eq(excluded(users::username)),
                        users::is_active.eq(excluded(users::is_active)),
                        users::updated_at.eq(excluded(users::updated_at)),
                    ))
                    .execute(tx)?;

                diesel::insert_into(team_members::table)
                    .values(&member_rows)
                    .execute(tx)?;
                Ok(())
            })
        })
        .await
    }

    async fn find_team(&self, name: &TeamName) -> DirectoryRepositoryResult<Option<Team>> {
        let team_name = name.clone();
        self.run_blocking(move |connection| {
            if !team_exists(connection, &team_name)? {
                return Ok(None);
            }
            let members = load_team_members(connection, &team_name)?
                .iter()
                .map(TeamMember::from_user)
                .collect();
            Team::new(team_name, members)
                .map(Some)
                .map_err(DirectoryRepositoryError::invalid_persisted_data)
        })
        .await
    }

    async fn team_exists(&self, name: &TeamName) -> DirectoryRepositoryResult<bool> {
        let team_name = name.clone();
        self.run_blocking(move |connection| team_exists(connection, &team_name))
            .await
    }

    async fn find_user(&self, id: &UserId) -> DirectoryRepositoryResult<Option<User>> {
        let user_id = id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(&user_id))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()?;
            let Some(user_row) = row else {
                return Ok(None);
            };
            let team_name = team_members::table
                .filter(team_members::user_id.eq(&user_id))
                .select(team_members::team_name)
                .first::<String>(connection)
                .optional()?;
            row_to_user(user_row, team_name).map(Some)
        })
        .await
    }

    async fn list_team_members(&self, name: &TeamName) -> DirectoryRepositoryResult<Vec<User>> {
        let team_name = name.clone();
        self.run_blocking(move |connection| load_team_members(connection, &team_name))
            .await
    }

    async fn update_user(&self, user: &User) -> DirectoryRepositoryResult<()> {
        let user_id = user.id().clone();
        let username = user.username().to_owned();
        let is_active = user.is_active();

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(users::table.filter(users::id.eq(user_id.as_str())))
                .set((
                    users::username.eq(&username),
                    users::is_active.eq(is_active),
                    users::updated_at.eq(Utc::now()),
                ))
                .execute(connection)?;

            if updated_count == 0 {
                return Err(DirectoryRepositoryError::UserNotFound(user_id));
            }
            Ok(())
        })
        .await
    }
}

fn team_exists(connection: &mut PgConnection, name: &TeamName) -> DirectoryRepositoryResult<bool> {
    let count: i64 = teams::table
        .filter(teams::name.eq(name.as_str()))
        .count()
        .get_result(connection)?;
    Ok(count > 0)
}

fn reject_foreign_membership(
    connection: &mut PgConnection,
    user_id: &str,
    team_name: &TeamName,
) -> DirectoryRepositoryResult<()> {
    let current = team_members::table
        .filter(team_members::user_id.eq(user_id))
        .select(team_members::team_name)
        .first::<String>(connection)
        .optional()?;
    match current {
        Some(current_team) if current_team != team_name.as_str() => {
            Err(DirectoryRepositoryError::MemberOfAnotherTeam {
                user_id: UserId::new(user_id)
                    .map_err(DirectoryRepositoryError::invalid_persisted_data)?,
                team_name: TeamName::new(current_team)
                    .map_err(DirectoryRepositoryError::invalid_persisted_data)?,
            })
        }
        _ => Ok(()),
    }
}

fn load_team_members(
    connection: &mut PgConnection,
    team_name: &TeamName,
) -> DirectoryRepositoryResult<Vec<User>> {
    let memberships = team_members::table
        .filter(team_members::team_name.eq(team_name.as_str()))
        .order(team_members::position.asc())
        .select(TeamMemberRow::as_select())
        .load::<TeamMemberRow>(connection)?;
    let member_ids: Vec<String> = memberships.iter().map(|row| row.user_id.clone()).collect();

    let mut rows_by_id: HashMap<String, UserRow> = users::table
        .filter(users::id.eq_any(member_ids))
        .select(UserRow::as_select())
        .load::<UserRow>(connection)?
        .into_iter()
        .map(|row| (row.id.clone(), row))
        .collect();

    memberships
        .iter()
        .filter_map(|membership| rows_by_id.remove(&membership.user_id))
        .map(|row| row_to_user(row, Some(team_name.as_str().to_owned())))
        .collect()
}

fn to_new_user_rows(team: &Team) -> Vec<NewUserRow> {
    let timestamp = Utc::now();
    team.members()
        .iter()
        .map(|member| NewUserRow {
            id: member.user_id().as_str().to_owned(),
            username: member.username().to_owned(),
            is_active: member.is_active(),
            created_at: timestamp,
            updated_at: timestamp,
        })
        .collect()
}

fn to_member_rows(team: &Team) -> DirectoryRepositoryResult<Vec<TeamMemberRow>> {
    team.members()
        .iter()
        .enumerate()
        .map(|(index, member)| {
            Ok(TeamMemberRow {
                user_id: member.user_id().as_str().to_owned(),
                team_name: team.name().as_str().to_owned(),
                position: i32::try_from(index).map_err(DirectoryRepositoryError::persistence)?,
            })
        })
        .collect()
}

fn row_to_user(row: UserRow, team_name: Option<String>) -> DirectoryRepositoryResult<User> {
    let UserRow {
        id,
        username,
        is_active,
    } = row;

    let parsed_id = UserId::new(id).map_err(DirectoryRepositoryError::invalid_persisted_data)?;
    let parsed_team = team_name
        .map(TeamName::new)
        .transpose()
        .map_err(DirectoryRepositoryError::invalid_persisted_data)?;

    Ok(User::from_persisted(PersistedUserData {
        id: parsed_id,
        username,
        team_name: parsed_team,
        is_active,
    }))
}
