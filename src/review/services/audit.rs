//! Best-effort audit recording.

use crate::review::{
    domain::{EventId, NewEvent},
    ports::EventRepository,
};
use std::sync::Arc;

/// Appends lifecycle events without ever failing the caller.
///
/// The state change an event describes is already committed when the event
/// is written, so a failed write is logged at `warn` and dropped.
#[derive(Clone)]
pub struct AuditRecorder<E>
where
    E: EventRepository,
{
    events: Arc<E>,
}

impl<E> AuditRecorder<E>
where
    E: EventRepository,
{
    /// Creates a recorder over the given event log.
    #[must_use]
    pub const fn new(events: Arc<E>) -> Self {
        Self { events }
    }

    /// Records `event`, returning its identifier, or `None` if the write
    /// failed.
    pub async fn record(&self, event: &NewEvent) -> Option<EventId> {
        match self.events.record(event).await {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::warn!(
                    pr_id = %event.pull_request_id(),
                    user_id = %event.user_id(),
                    event_type = %event.kind(),
                    error = %err,
                    "failed to record audit event"
                );
                None
            }
        }
    }
}
