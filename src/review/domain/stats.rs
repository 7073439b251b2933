//! Aggregated event statistics.

use super::EventKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Count of recorded events per kind.
///
/// Every [`EventKind`] is present; kinds with no events report zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Events recorded per kind.
    pub event_counts: BTreeMap<EventKind, u64>,
    /// Sum of all per-kind counts.
    pub total_events: u64,
}

impl StatsResponse {
    /// Builds the response from raw per-kind counts.
    #[must_use]
    pub fn from_counts(counts: impl IntoIterator<Item = (EventKind, u64)>) -> Self {
        let mut event_counts: BTreeMap<EventKind, u64> =
            EventKind::ALL.into_iter().map(|kind| (kind, 0)).collect();
        for (kind, count) in counts {
            let slot = event_counts.entry(kind).or_insert(0);
            *slot = slot.saturating_add(count);
        }
        let total_events = event_counts.values().sum();
        Self {
            event_counts,
            total_events,
        }
    }

    /// Returns the count for `kind`.
    #[must_use]
    pub fn count(&self, kind: EventKind) -> u64 {
        self.event_counts.get(&kind).copied().unwrap_or(0)
    }
}
