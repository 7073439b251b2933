//! Tests for reviewer selection.

use super::{add_team, directory_with_team, user};
use crate::directory::domain::{TeamName, User};
use crate::review::{
    domain::{PullRequest, PullRequestId},
    services::{AssignmentError, ReviewerAssignmentEngine, initial_candidates},
};
use mockable::DefaultClock;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rstest::rstest;
use std::collections::HashSet;

fn team(name: &str) -> TeamName {
    TeamName::new(name).expect("valid team name")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn initial_selection_picks_two_distinct_active_non_authors() {
    let directory = directory_with_team(
        "infra",
        &[("u1", true), ("u2", true), ("u3", false), ("u4", true), ("u5", true)],
    )
    .await;
    let engine = ReviewerAssignmentEngine::new(directory, &DefaultClock);

    for _ in 0..20 {
        let reviewers = engine
            .select_initial_reviewers(&team("infra"), &user("u1"))
            .await
            .expect("selection should succeed");

        let unique: HashSet<_> = reviewers.iter().collect();
        assert_eq!(reviewers.len(), 2);
        assert_eq!(unique.len(), 2);
        assert!(!reviewers.contains(&user("u1")));
        assert!(!reviewers.contains(&user("u3")));
    }
}

#[rstest]
#[case::only_author(&[("u1", true)], 0)]
#[case::one_teammate(&[("u1", true), ("u2", true)], 1)]
#[case::inactive_teammates(&[("u1", true), ("u2", false), ("u3", false)], 0)]
#[case::author_inactive(&[("u1", false), ("u2", true), ("u3", true), ("u4", true)], 2)]
#[tokio::test(flavor = "multi_thread")]
async fn initial_selection_size_is_bounded_by_eligible_pool(
    #[case] members: &[(&str, bool)],
    #[case] expected: usize,
) {
    let directory = directory_with_team("infra", members).await;
    let engine = ReviewerAssignmentEngine::new(directory, &DefaultClock);

    let reviewers = engine
        .select_initial_reviewers(&team("infra"), &user("u1"))
        .await
        .expect("selection should succeed");

    assert_eq!(reviewers.len(), expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn equal_seeds_produce_equal_selections() {
    let members: &[(&str, bool)] = &[
        ("u1", true),
        ("u2", true),
        ("u3", true),
        ("u4", true),
        ("u5", true),
        ("u6", true),
    ];
    let directory = directory_with_team("infra", members).await;
    let first = ReviewerAssignmentEngine::with_rng(directory.clone(), StdRng::seed_from_u64(7));
    let second = ReviewerAssignmentEngine::with_rng(directory, StdRng::seed_from_u64(7));

    for _ in 0..5 {
        let left = first
            .select_initial_reviewers(&team("infra"), &user("u1"))
            .await
            .expect("selection should succeed");
        let right = second
            .select_initial_reviewers(&team("infra"), &user("u1"))
            .await
            .expect("selection should succeed");
        assert_eq!(left, right);
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn replacement_comes_from_the_outgoing_reviewers_team() {
    let directory = directory_with_team("backend", &[("author", true)]).await;
    add_team(
        &directory,
        "infra",
        &[("r1", true), ("r2", true), ("r3", true), ("r4", false)],
    )
    .await;
    let engine = ReviewerAssignmentEngine::new(directory, &DefaultClock);
    let pull_request = PullRequest::open(
        PullRequestId::new("pr-1").expect("valid pull request id"),
        "Cross-team change",
        user("author"),
        vec![user("r1"), user("r2")],
        &DefaultClock,
    )
    .expect("valid pull request");

    let replacement = engine
        .select_replacement(&pull_request, &user("r1"))
        .await
        .expect("a candidate should remain");

    assert_eq!(replacement, user("r3"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn replacement_fails_when_pool_is_exhausted() {
    let directory = directory_with_team("infra", &[("u1", true), ("u2", true), ("u3", true)]).await;
    let engine = ReviewerAssignmentEngine::new(directory, &DefaultClock);
    let pull_request = PullRequest::open(
        PullRequestId::new("pr-1").expect("valid pull request id"),
        "Small team",
        user("u1"),
        vec![user("u2"), user("u3")],
        &DefaultClock,
    )
    .expect("valid pull request");

    let result = engine.select_replacement(&pull_request, &user("u2")).await;

    assert!(matches!(result, Err(AssignmentError::NoCandidate { .. })));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn replacement_fails_for_reviewer_unknown_to_directory() {
    let directory = directory_with_team("infra", &[("u1", true), ("u2", true)]).await;
    let engine = ReviewerAssignmentEngine::new(directory, &DefaultClock);
    let pull_request = PullRequest::open(
        PullRequestId::new("pr-1").expect("valid pull request id"),
        "Orphan reviewer",
        user("u1"),
        vec![user("ghost")],
        &DefaultClock,
    )
    .expect("valid pull request");

    let result = engine.select_replacement(&pull_request, &user("ghost")).await;

    assert!(matches!(result, Err(AssignmentError::NoCandidate { .. })));
}

#[rstest]
fn initial_candidates_preserve_listing_order() {
    let members = vec![
        User::new(user("u3"), "C", true),
        User::new(user("u1"), "A", true),
        User::new(user("u2"), "B", false),
        User::new(user("u4"), "D", true),
    ];

    assert_eq!(
        initial_candidates(&members, &user("u1")),
        vec![user("u3"), user("u4")]
    );
}
