use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

/// How long search input has to sit still before it is sent
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Hands out tickets for input events. Only the most recent ticket survives `settle`, so a burst
/// of keystrokes results in a single request.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    latest: AtomicU64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            latest: AtomicU64::new(0),
        }
    }

    /// Registers a new event, invalidating every ticket handed out before it.
    pub fn ticket(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Waits out the delay, then reports whether `ticket` is still the latest event.
    pub async fn settle(&self, ticket: Ticket) -> bool {
        tokio::time::sleep(self.delay).await;
        self.is_latest(ticket)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}
