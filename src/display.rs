//! Display target
//!
//! A single-slot mailbox holding the one visible message. Every write
//! replaces the previous message; overlapping invocations race and the last
//! write wins. With `discard_stale` set, writes from an invocation that has
//! been superseded by a newer one are dropped instead.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::debug;

/// Identifies one action invocation; later invocations get larger tickets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(pub u64);

/// Write access to the host's display
pub trait DisplaySink: Send + Sync {
    /// Register the start of an invocation
    fn begin(&self) -> Ticket;

    /// Replace the visible message; returns false if the write was dropped
    fn show(&self, ticket: Ticket, text: String) -> bool;
}

/// The visible message
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayMessage {
    pub text: String,
    pub ticket: Ticket,
    pub shown_at: DateTime<Utc>,
}

pub struct DisplayTarget {
    discard_stale: bool,
    last_ticket: AtomicU64,
    slot: watch::Sender<Option<DisplayMessage>>,
}

impl DisplayTarget {
    pub fn new(discard_stale: bool) -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            discard_stale,
            last_ticket: AtomicU64::new(0),
            slot,
        }
    }

    /// Currently visible message
    pub fn current(&self) -> Option<DisplayMessage> {
        self.slot.borrow().clone()
    }

    /// Currently visible text; empty before the first write
    pub fn text(&self) -> String {
        self.slot
            .borrow()
            .as_ref()
            .map(|m| m.text.clone())
            .unwrap_or_default()
    }

    /// Watch for display changes
    pub fn subscribe(&self) -> watch::Receiver<Option<DisplayMessage>> {
        self.slot.subscribe()
    }
}

impl Default for DisplayTarget {
    fn default() -> Self {
        Self::new(false)
    }
}

impl DisplaySink for DisplayTarget {
    fn begin(&self) -> Ticket {
        Ticket(self.last_ticket.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn show(&self, ticket: Ticket, text: String) -> bool {
        // The staleness check runs under the slot's write lock so a newer
        // message cannot land between the check and the replace.
        self.slot.send_if_modified(|slot| {
            if self.discard_stale {
                let newest = self.last_ticket.load(Ordering::SeqCst);
                if ticket.0 < newest {
                    debug!(
                        "Dropping display write from invocation {} (newest is {})",
                        ticket.0, newest
                    );
                    return false;
                }
            }

            *slot = Some(DisplayMessage {
                text,
                ticket,
                shown_at: Utc::now(),
            });
            true
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_last_write_wins() {
        let display = DisplayTarget::new(false);
        assert_eq!(display.text(), "");

        let first = display.begin();
        let second = display.begin();
        assert!(first < second);

        assert!(display.show(second, "second".to_string()));
        assert!(display.show(first, "first".to_string()));
        assert_eq!(display.text(), "first");
        assert_eq!(display.current().unwrap().ticket, first);
    }

    #[test]
    fn test_discard_stale() {
        let display = DisplayTarget::new(true);

        let first = display.begin();
        assert!(display.show(first, "interim".to_string()));

        let second = display.begin();
        assert!(display.show(second, "second".to_string()));
        assert!(!display.show(first, "first".to_string()));
        assert_eq!(display.text(), "second");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_discard_stale_under_contention() {
        let display = Arc::new(DisplayTarget::new(true));

        let writers: Vec<_> = (0..8)
            .map(|_| {
                let display = display.clone();
                tokio::spawn(async move {
                    for _ in 0..200 {
                        let ticket = display.begin();
                        display.show(ticket, format!("#{}", ticket.0));
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.await.unwrap();
        }

        let last = display.current().unwrap();
        assert_eq!(last.ticket, Ticket(1600));
        assert_eq!(last.text, "#1600");
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let display = DisplayTarget::new(false);
        let mut rx = display.subscribe();

        let ticket = display.begin();
        display.show(ticket, "hello".to_string());

        rx.changed().await.unwrap();
        let message = rx.borrow_and_update().clone().unwrap();
        assert_eq!(message.text, "hello");
    }
}
