//! Change notifications for live-refresh consumers.
//!
//! A backend owns a `ChangeFeed` and publishes one `ChangeEvent` after each
//! successful write. Consumers hold a `Subscription`, a blocking iterator
//! that yields events until the backend is dropped.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Mutex;
use std::time::Duration;

use super::traits::Collection;

/// "Collection changed" notification. Carries no diff; consumers re-read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub collection: Collection,
}

/// Lazy sequence of change events for one collection.
pub struct Subscription {
    collection: Collection,
    rx: Receiver<ChangeEvent>,
}

impl Subscription {
    /// Collection this subscription watches.
    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Next pending event, without blocking.
    pub fn try_next(&self) -> Option<ChangeEvent> {
        self.rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next event.
    pub fn next_timeout(&self, timeout: Duration) -> Option<ChangeEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl Iterator for Subscription {
    type Item = ChangeEvent;

    /// Blocks until the next event; ends when the feed is dropped.
    fn next(&mut self) -> Option<ChangeEvent> {
        self.rx.recv().ok()
    }
}

/// Fan-out of change events to every live subscription.
#[derive(Default)]
pub struct ChangeFeed {
    subscribers: Mutex<Vec<(Collection, Sender<ChangeEvent>)>>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber for `collection`.
    pub fn subscribe(&self, collection: Collection) -> Subscription {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push((collection, tx));
        }
        Subscription { collection, rx }
    }

    /// Notify subscribers of `collection`, dropping any that hung up.
    pub fn publish(&self, collection: Collection) {
        let Ok(mut subscribers) = self.subscribers.lock() else {
            tracing::warn!(%collection, "change feed poisoned; notification dropped");
            return;
        };
        let event = ChangeEvent { collection };
        subscribers.retain(|(watched, tx)| *watched != collection || tx.send(event).is_ok());
    }

    /// Number of live subscribers (all collections).
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_reaches_matching_subscribers_only() {
        let feed = ChangeFeed::new();
        let students = feed.subscribe(Collection::Students);
        let payments = feed.subscribe(Collection::Payments);

        feed.publish(Collection::Payments);

        assert_eq!(
            payments.try_next(),
            Some(ChangeEvent {
                collection: Collection::Payments
            })
        );
        assert_eq!(students.try_next(), None);
    }

    #[test]
    fn test_dropped_subscription_is_pruned() {
        let feed = ChangeFeed::new();
        let sub = feed.subscribe(Collection::Students);
        assert_eq!(feed.subscriber_count(), 1);

        drop(sub);
        feed.publish(Collection::Students);
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[test]
    fn test_iterator_ends_when_feed_dropped() {
        let feed = ChangeFeed::new();
        let mut sub = feed.subscribe(Collection::Students);
        feed.publish(Collection::Students);
        drop(feed);

        assert!(sub.next().is_some());
        assert!(sub.next().is_none());
    }
}
