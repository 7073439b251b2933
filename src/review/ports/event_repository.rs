//! Repository port for the append-only audit log.

use crate::review::domain::{Event, EventId, EventKind, NewEvent};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for event repository operations.
pub type EventRepositoryResult<T> = Result<T, EventRepositoryError>;

/// Append-only audit log contract. Recorded events are never updated or
/// deleted.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Appends an event and returns its store-assigned identifier.
    async fn record(&self, event: &NewEvent) -> EventRepositoryResult<EventId>;

    /// Returns up to `limit` events of `kind`, newest first.
    async fn list_by_kind(&self, kind: EventKind, limit: usize)
    -> EventRepositoryResult<Vec<Event>>;

    /// Returns the number of recorded events per kind. Kinds without events
    /// may be omitted.
    async fn count_by_kind(&self) -> EventRepositoryResult<Vec<(EventKind, u64)>>;
}

/// Errors returned by event repository implementations.
#[derive(Debug, Clone, Error)]
pub enum EventRepositoryError {
    /// The payload could not be encoded for storage.
    #[error("event payload could not be encoded: {0}")]
    Encoding(Arc<serde_json::Error>),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl EventRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<serde_json::Error> for EventRepositoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encoding(Arc::new(err))
    }
}

impl From<diesel::result::Error> for EventRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}
