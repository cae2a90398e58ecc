//! Per-control request sequencing.
//!
//! A control that can fire overlapping requests (a search box, a filter, a
//! dashboard selector) owns one [`RequestSequencer`]. Each dispatch takes a
//! [`Ticket`]; when its response arrives, [`RequestSequencer::try_apply`] only lets it
//! through if no newer response has been applied already.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Sequence number handed out for one dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn number(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug, Default)]
pub struct RequestSequencer {
    issued: Arc<AtomicU64>,
    applied: Arc<AtomicU64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next ticket. Tickets start at 1.
    pub fn begin(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Mark `ticket` as applied if it is newer than the last applied one.
    ///
    /// Returns `false` for stale responses, which the caller must drop.
    pub fn try_apply(&self, ticket: Ticket) -> bool {
        let previous = self.applied.fetch_max(ticket.0, Ordering::SeqCst);
        if previous >= ticket.0 {
            tracing::debug!(
                "Discarding stale response #{} (already applied #{})",
                ticket.0,
                previous
            );
            return false;
        }
        true
    }

    /// Whether `ticket` is still the newest dispatch.
    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }
}
