//! Read path over the audit log.

use crate::error::ErrorKind;
use crate::review::{
    domain::{Event, EventKind, StatsResponse},
    ports::{EventRepository, EventRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for event statistics.
#[derive(Debug, Error)]
pub enum ReviewStatsError {
    /// Event log access failed.
    #[error(transparent)]
    Repository(#[from] EventRepositoryError),
}

impl ReviewStatsError {
    /// Classifies the error for boundary-layer mapping.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Repository(_) => ErrorKind::Unexpected,
        }
    }
}

/// Result type for event statistics operations.
pub type ReviewStatsResult<T> = Result<T, ReviewStatsError>;

/// Aggregates and lists recorded audit events.
#[derive(Clone)]
pub struct ReviewStatsService<E>
where
    E: EventRepository,
{
    events: Arc<E>,
}

impl<E> ReviewStatsService<E>
where
    E: EventRepository,
{
    /// Creates a statistics service over the given event log.
    #[must_use]
    pub const fn new(events: Arc<E>) -> Self {
        Self { events }
    }

    /// Returns the number of events per kind. Every kind is present.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewStatsError::Repository`] when the log cannot be read.
    pub async fn get_stats(&self) -> ReviewStatsResult<StatsResponse> {
        let counts = self.events.count_by_kind().await?;
        Ok(StatsResponse::from_counts(counts))
    }

    /// Returns up to `limit` events of `kind`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewStatsError::Repository`] when the log cannot be read.
    pub async fn list_events(
        &self,
        kind: EventKind,
        limit: usize,
    ) -> ReviewStatsResult<Vec<Event>> {
        Ok(self.events.list_by_kind(kind, limit).await?)
    }
}
