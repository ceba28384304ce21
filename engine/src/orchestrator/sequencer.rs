//! Staleness guard for user selections
//!
//! Every new selection takes a [`Ticket`]. When its result arrives, the
//! result is only delivered if no newer selection has been made in the
//! meantime, so a slow response for an old location can never overwrite
//! the view for the current one.

use std::sync::atomic::{AtomicU64, Ordering};

/// Sequence number of one orchestrated request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tickets
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier ticket
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Hand back `value` only if `ticket` is still the latest
    pub fn deliver<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            tracing::debug!(
                "Discarding stale result for request #{} (latest is #{})",
                ticket.0,
                self.latest.load(Ordering::SeqCst)
            );
            None
        }
    }
}
