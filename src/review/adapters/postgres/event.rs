//! `PostgreSQL` repository implementation for the audit log.

use super::{
    models::{EventRow, NewEventRow},
    schema::events,
};
use crate::db::PgPool;
use crate::directory::domain::UserId;
use crate::review::{
    domain::{Event, EventId, EventKind, EventPayload, NewEvent, PersistedEventData, PullRequestId},
    ports::{EventRepository, EventRepositoryError, EventRepositoryResult},
};
use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed append-only event log.
#[derive(Debug, Clone)]
pub struct PostgresEventLog {
    pool: PgPool,
}

impl PostgresEventLog {
    /// Creates a new event log from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> EventRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> EventRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(EventRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(EventRepositoryError::persistence)?
    }
}

#[async_trait]
impl EventRepository for PostgresEventLog {
    async fn record(&self, event: &NewEvent) -> EventRepositoryResult<EventId> {
        let row = NewEventRow {
            event_type: event.kind().as_str().to_owned(),
            pr_id: event.pull_request_id().as_str().to_owned(),
            user_id: event.user_id().as_str().to_owned(),
            additional_data: event.payload().to_json()?,
            created_at: event.occurred_at(),
        };

        self.run_blocking(move |connection| {
            let id = diesel::insert_into(events::table)
                .values(&row)
                .returning(events::id)
                .get_result::<i64>(connection)?;
            Ok(EventId::new(id))
        })
        .await
    }

    async fn list_by_kind(
        &self,
        kind: EventKind,
        limit: usize,
    ) -> EventRepositoryResult<Vec<Event>> {
        let row_limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.run_blocking(move |connection| {
            events::table
                .filter(events::event_type.eq(kind.as_str()))
                .order((events::created_at.desc(), events::id.desc()))
                .limit(row_limit)
                .select(EventRow::as_select())
                .load::<EventRow>(connection)?
                .into_iter()
                .map(row_to_event)
                .collect()
        })
        .await
    }

    async fn count_by_kind(&self) -> EventRepositoryResult<Vec<(EventKind, u64)>> {
        self.run_blocking(move |connection| {
            events::table
                .group_by(events::event_type)
                .select((events::event_type, count_star()))
                .load::<(String, i64)>(connection)?
                .into_iter()
                .map(|(event_type, count)| {
                    let kind = EventKind::try_from(event_type.as_str())
                        .map_err(EventRepositoryError::invalid_persisted_data)?;
                    let total =
                        u64::try_from(count).map_err(EventRepositoryError::invalid_persisted_data)?;
                    Ok((kind, total))
                })
                .collect()
        })
        .await
    }
}

fn row_to_event(row: EventRow) -> EventRepositoryResult<Event> {
    let EventRow {
        id,
        event_type,
        pr_id,
        user_id,
        additional_data,
        created_at,
    } = row;

    let kind = EventKind::try_from(event_type.as_str())
        .map_err(EventRepositoryError::invalid_persisted_data)?;
    Ok(Event::from_persisted(PersistedEventData {
        id: EventId::new(id),
        pull_request_id: PullRequestId::new(pr_id)
            .map_err(EventRepositoryError::invalid_persisted_data)?,
        user_id: UserId::new(user_id).map_err(EventRepositoryError::invalid_persisted_data)?,
        payload: EventPayload::from_json(kind, additional_data)
            .map_err(EventRepositoryError::invalid_persisted_data)?,
        created_at,
    }))
}
