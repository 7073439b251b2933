//! In-memory append-only audit log.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::review::{
    domain::{Event, EventId, EventKind, NewEvent},
    ports::{EventRepository, EventRepositoryError, EventRepositoryResult},
};

/// Thread-safe in-memory event log with sequential identifiers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventLog {
    state: Arc<RwLock<Vec<Event>>>,
}

impl InMemoryEventLog {
    /// Creates an empty event log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded event in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`EventRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn snapshot(&self) -> EventRepositoryResult<Vec<Event>> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> EventRepositoryResult<RwLockReadGuard<'_, Vec<Event>>> {
        self.state.read().map_err(|err| {
            EventRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> EventRepositoryResult<RwLockWriteGuard<'_, Vec<Event>>> {
        self.state.write().map_err(|err| {
            EventRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl EventRepository for InMemoryEventLog {
    async fn record(&self, event: &NewEvent) -> EventRepositoryResult<EventId> {
        let mut events = self.write()?;
        let next = events
            .last()
            .map_or(1, |last| last.id().value().saturating_add(1));
        let id = EventId::new(next);
        events.push(event.clone().into_event(id));
        Ok(id)
    }

    async fn list_by_kind(
        &self,
        kind: EventKind,
        limit: usize,
    ) -> EventRepositoryResult<Vec<Event>> {
        let events = self.read()?;
        Ok(events
            .iter()
            .rev()
            .filter(|event| event.kind() == kind)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_by_kind(&self) -> EventRepositoryResult<Vec<(EventKind, u64)>> {
        let events = self.read()?;
        let mut counts: BTreeMap<EventKind, u64> = BTreeMap::new();
        for event in events.iter() {
            let count = counts.entry(event.kind()).or_insert(0);
            *count = count.saturating_add(1);
        }
        Ok(counts.into_iter().collect())
    }
}
