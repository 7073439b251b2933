//! Unit tests for directory domain types.

use crate::directory::domain::{DirectoryDomainError, Team, TeamMember, TeamName, UserId};
use rstest::rstest;

fn member(id: &str, active: bool) -> TeamMember {
    TeamMember::new(UserId::new(id).expect("valid user id"), id.to_uppercase(), active)
        .expect("valid member")
}

// ── Identifier validation ──────────────────────────────────────────

#[rstest]
#[case("u1", "u1")]
#[case("  u2  ", "u2")]
fn user_id_is_trimmed(#[case] input: &str, #[case] expected: &str) {
    let id = UserId::new(input).expect("valid user id");
    assert_eq!(id.as_str(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
fn empty_user_id_is_rejected(#[case] input: &str) {
    assert_eq!(UserId::new(input), Err(DirectoryDomainError::EmptyUserId));
}

#[rstest]
#[case(255, true)]
#[case(256, false)]
fn team_name_length_boundary(#[case] length: usize, #[case] expected_ok: bool) {
    let result = TeamName::new("t".repeat(length));
    if expected_ok {
        assert!(result.is_ok(), "expected length {length} to be accepted");
    } else {
        assert!(matches!(
            result,
            Err(DirectoryDomainError::TeamNameTooLong(_))
        ));
    }
}

// ── Team construction ──────────────────────────────────────────────

#[rstest]
fn member_with_blank_username_is_rejected() {
    let user_id = UserId::new("u1").expect("valid user id");
    let result = TeamMember::new(user_id.clone(), "  ", true);
    assert_eq!(result, Err(DirectoryDomainError::EmptyUsername(user_id)));
}

#[rstest]
#[case(255, true)]
#[case(256, false)]
fn username_length_boundary(#[case] length: usize, #[case] expected_ok: bool) {
    let user_id = UserId::new("u1").expect("valid user id");
    let result = TeamMember::new(user_id.clone(), "n".repeat(length), true);
    if expected_ok {
        assert!(result.is_ok(), "expected length {length} to be accepted");
    } else {
        assert_eq!(result, Err(DirectoryDomainError::UsernameTooLong(user_id)));
    }
}

#[rstest]
fn duplicate_member_is_rejected() {
    let name = TeamName::new("infra").expect("valid team name");
    let result = Team::new(name, vec![member("u1", true), member("u1", false)]);
    assert!(matches!(
        result,
        Err(DirectoryDomainError::DuplicateTeamMember(id)) if id.as_str() == "u1"
    ));
}

#[rstest]
fn member_users_carry_team_and_active_flag() {
    let name = TeamName::new("infra").expect("valid team name");
    let team = Team::new(name.clone(), vec![member("u1", true), member("u2", false)])
        .expect("valid team");

    let users = team.member_users();

    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|user| user.team_name() == Some(&name)));
    let flags: Vec<bool> = users.iter().map(crate::directory::domain::User::is_active).collect();
    assert_eq!(flags, vec![true, false]);
}
