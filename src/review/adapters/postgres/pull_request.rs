//! `PostgreSQL` repository implementation for pull requests.

use super::{
    models::{PullRequestRow, ReviewerRow},
    schema::{pr_reviewers, pull_requests},
};
use crate::db::PgPool;
use crate::directory::domain::UserId;
use crate::review::{
    domain::{PersistedPullRequestData, PullRequest, PullRequestId, PullRequestStatus},
    ports::{PullRequestRepository, PullRequestRepositoryError, PullRequestRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::HashMap;

/// `PostgreSQL`-backed pull request repository.
#[derive(Debug, Clone)]
pub struct PostgresPullRequestRepository {
    pool: PgPool,
}

impl PostgresPullRequestRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> PullRequestRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> PullRequestRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(PullRequestRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(PullRequestRepositoryError::persistence)?
    }
}

#[async_trait]
impl PullRequestRepository for PostgresPullRequestRepository {
    async fn store(&self, pull_request: &PullRequest) -> PullRequestRepositoryResult<()> {
        let pr_id = pull_request.id().clone();
        let row = to_row(pull_request);
        let reviewer_rows = to_reviewer_rows(pull_request)?;

        self.run_blocking(move |connection| {
            connection.transaction::<_, PullRequestRepositoryError, _>(|tx| {
                diesel::insert_into(pull_requests::table)
                    .values(&row)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            PullRequestRepositoryError::DuplicatePullRequest(pr_id.clone())
                        }
                        _ => PullRequestRepositoryError::persistence(err),
                    })?;
                insert_reviewers(tx, &reviewer_rows)
            })
        })
        .await
    }

    async fn update(&self, pull_request: &PullRequest) -> PullRequestRepositoryResult<()> {
        let pr_id = pull_request.id().clone();
        let row = to_row(pull_request);
        let reviewer_rows = to_reviewer_rows(pull_request)?;

        self.run_blocking(move |connection| {
            connection.transaction::<_, PullRequestRepositoryError, _>(|tx| {
                let updated_count =
                    diesel::update(pull_requests::table.filter(pull_requests::id.eq(&row.id)))
                        .set((
                            pull_requests::name.eq(&row.name),
                            pull_requests::status.eq(&row.status),
                            pull_requests::merged_at.eq(row.merged_at),
                        ))
                        .execute(tx)?;
                if updated_count == 0 {
                    return Err(PullRequestRepositoryError::NotFound(pr_id.clone()));
                }

                diesel::delete(pr_reviewers::table.filter(pr_reviewers::pr_id.eq(&row.id)))
                    .execute(tx)?;
                insert_reviewers(tx, &reviewer_rows)
            })
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: &PullRequestId,
    ) -> PullRequestRepositoryResult<Option<PullRequest>> {
        let pr_id = id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = pull_requests::table
                .filter(pull_requests::id.eq(&pr_id))
                .select(PullRequestRow::as_select())
                .first::<PullRequestRow>(connection)
                .optional()?;
            let Some(pr_row) = row else {
                return Ok(None);
            };
            let reviewers = pr_reviewers::table
                .filter(pr_reviewers::pr_id.eq(&pr_id))
                .order(pr_reviewers::position.asc())
                .select(pr_reviewers::user_id)
                .load::<String>(connection)?;
            row_to_pull_request(pr_row, reviewers).map(Some)
        })
        .await
    }

    async fn exists(&self, id: &PullRequestId) -> PullRequestRepositoryResult<bool> {
        let pr_id = id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let count: i64 = pull_requests::table
                .filter(pull_requests::id.eq(&pr_id))
                .count()
                .get_result(connection)?;
            Ok(count > 0)
        })
        .await
    }

    async fn list_by_reviewer(
        &self,
        reviewer_id: &UserId,
    ) -> PullRequestRepositoryResult<Vec<PullRequest>> {
        let user_id = reviewer_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let pr_ids = pr_reviewers::table
                .filter(pr_reviewers::user_id.eq(&user_id))
                .select(pr_reviewers::pr_id)
                .load::<String>(connection)?;
            if pr_ids.is_empty() {
                return Ok(Vec::new());
            }

            let pr_rows = pull_requests::table
                .filter(pull_requests::id.eq_any(pr_ids.clone()))
                .order((pull_requests::created_at.desc(), pull_requests::id.desc()))
                .select(PullRequestRow::as_select())
                .load::<PullRequestRow>(connection)?;

            let mut reviewers_by_pr: HashMap<String, Vec<String>> = HashMap::new();
            for reviewer in pr_reviewers::table
                .filter(pr_reviewers::pr_id.eq_any(pr_ids))
                .order((pr_reviewers::pr_id.asc(), pr_reviewers::position.asc()))
                .select(ReviewerRow::as_select())
                .load::<ReviewerRow>(connection)?
            {
                reviewers_by_pr
                    .entry(reviewer.pr_id)
                    .or_default()
                    .push(reviewer.user_id);
            }

            pr_rows
                .into_iter()
                .map(|row| {
                    let reviewers = reviewers_by_pr.remove(&row.id).unwrap_or_default();
                    row_to_pull_request(row, reviewers)
                })
                .collect()
        })
        .await
    }
}

fn insert_reviewers(
    connection: &mut PgConnection,
    rows: &[ReviewerRow],
) -> PullRequestRepositoryResult<()> {
    if rows.is_empty() {
        return Ok(());
    }
    diesel::insert_into(pr_reviewers::table)
        .values(rows)
        .execute(connection)?;
    Ok(())
}

fn to_row(pull_request: &PullRequest) -> PullRequestRow {
    PullRequestRow {
        id: pull_request.id().as_str().to_owned(),
        name: pull_request.name().to_owned(),
        author_id: pull_request.author_id().as_str().to_owned(),
        status: pull_request.status().as_str().to_owned(),
        created_at: pull_request.created_at(),
        merged_at: pull_request.merged_at(),
    }
}

fn to_reviewer_rows(pull_request: &PullRequest) -> PullRequestRepositoryResult<Vec<ReviewerRow>> {
    pull_request
        .reviewers()
        .iter()
        .enumerate()
        .map(|(index, reviewer)| {
            Ok(ReviewerRow {
                pr_id: pull_request.id().as_str().to_owned(),
                user_id: reviewer.as_str().to_owned(),
                position: i32::try_from(index).map_err(PullRequestRepositoryError::persistence)?,
            })
        })
        .collect()
}

fn row_to_pull_request(
    row: PullRequestRow,
    reviewers: Vec<String>,
) -> PullRequestRepositoryResult<PullRequest> {
    let PullRequestRow {
        id,
        name,
        author_id,
        status,
        created_at,
        merged_at,
    } = row;

    let data = PersistedPullRequestData {
        id: PullRequestId::new(id).map_err(PullRequestRepositoryError::invalid_persisted_data)?,
        name,
        author_id: UserId::new(author_id)
            .map_err(PullRequestRepositoryError::invalid_persisted_data)?,
        status: PullRequestStatus::try_from(status.as_str())
            .map_err(PullRequestRepositoryError::invalid_persisted_data)?,
        reviewers: reviewers
            .into_iter()
            .map(UserId::new)
            .collect::<Result<_, _>>()
            .map_err(PullRequestRepositoryError::invalid_persisted_data)?,
        created_at,
        merged_at,
    };
    Ok(PullRequest::from_persisted(data))
}
