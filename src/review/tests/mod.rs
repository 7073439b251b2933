//! Unit tests for the review module.

mod assignment_tests;

use crate::directory::{
    adapters::memory::InMemoryDirectory,
    domain::{Team, TeamMember, TeamName, UserId},
    ports::DirectoryRepository,
};
use std::sync::Arc;

/// Builds a directory holding a single team whose members are
/// `(user_id, is_active)` pairs.
async fn directory_with_team(team_name: &str, members: &[(&str, bool)]) -> Arc<InMemoryDirectory> {
    let directory = Arc::new(InMemoryDirectory::new());
    add_team(&directory, team_name, members).await;
    directory
}

async fn add_team(directory: &InMemoryDirectory, team_name: &str, members: &[(&str, bool)]) {
    let team_members = members
        .iter()
        .map(|(id, is_active)| {
            TeamMember::new(
                UserId::new(*id).expect("valid user id"),
                format!("user {id}"),
                *is_active,
            )
            .expect("valid member")
        })
        .collect();
    let team = Team::new(TeamName::new(team_name).expect("valid team name"), team_members)
        .expect("valid team");
    directory
        .create_team(&team)
        .await
        .expect("team creation should succeed");
}

fn user(id: &str) -> UserId {
    UserId::new(id).expect("valid user id")
}
