// SPDX-FileCopyrightText: 2026 Pulso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Internal typed event bus for row-insertion notifications.
//!
//! The event store publishes one [`FeedEvent`] per stored row; dashboard
//! consumers (the in-process live feed, the SSE stream) subscribe through
//! explicit, cancellable handles. Built on `tokio::sync::broadcast`:
//! delivery is best-effort fan-out, and a subscriber that falls behind the
//! channel capacity loses the oldest notifications rather than blocking
//! the publisher.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use pulso_core::Interaction;

/// Default capacity of the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// A notification delivered to feed subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeedEvent {
    /// A new row was appended to the interaction table.
    Inserted(Interaction),
}

/// Handle for publishing feed events and creating subscriptions.
///
/// Cloning is cheap; all clones publish into the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<FeedEvent>,
}

impl EventBus {
    /// Create a bus with the given channel capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Events published while no subscriber exists are dropped; the bus
    /// carries notifications, not durable state.
    pub fn publish(&self, event: FeedEvent) {
        let delivered = self.tx.send(event).unwrap_or(0);
        debug!(subscribers = delivered, "feed event published");
    }

    /// Create a new subscription receiving every event published after
    /// this call.
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

/// A cancellable subscription to the bus.
///
/// Dropping the handle (or calling [`unsubscribe`](Self::unsubscribe))
/// releases it; the publisher is never blocked by a held subscription.
pub struct Subscription {
    rx: broadcast::Receiver<FeedEvent>,
}

impl Subscription {
    /// Receive the next event.
    ///
    /// Returns `None` once the bus has been dropped and all buffered events
    /// are consumed. If this subscriber lagged behind the channel capacity,
    /// the gap is skipped and the next retained event is returned.
    pub async fn recv(&mut self) -> Option<FeedEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    debug!(missed, "feed subscriber lagged, skipping to oldest retained event");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Release the subscription explicitly.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulso_core::{EventType, Metadata, Platform};

    fn make_row(id: &str) -> Interaction {
        Interaction {
            id: id.to_string(),
            platform: Platform::Instagram,
            event_type: EventType::Comment,
            full_name: "João Silva".to_string(),
            response: "Enviamos os detalhes!".to_string(),
            instagram_username: Some("joao".to_string()),
            keyword: Some("PROMO".to_string()),
            comment: Some("quero saber mais".to_string()),
            whatsapp_id: None,
            group_name: None,
            metadata: Metadata::new(),
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[tokio::test]
    async fn published_event_reaches_subscriber() {
        let bus = EventBus::default();
        let mut sub = bus.subscribe();

        bus.publish(FeedEvent::Inserted(make_row("r1")));

        let event = sub.recv().await.unwrap();
        match event {
            FeedEvent::Inserted(row) => assert_eq!(row.id, "r1"),
        }
    }

    #[tokio::test]
    async fn each_subscriber_receives_every_event() {
        let bus = EventBus::default();
        let mut sub_a = bus.subscribe();
        let mut sub_b = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(FeedEvent::Inserted(make_row("r1")));
        bus.publish(FeedEvent::Inserted(make_row("r2")));

        for sub in [&mut sub_a, &mut sub_b] {
            let FeedEvent::Inserted(first) = sub.recv().await.unwrap();
            let FeedEvent::Inserted(second) = sub.recv().await.unwrap();
            assert_eq!(first.id, "r1");
            assert_eq!(second.id, "r2");
        }
    }

    #[tokio::test]
    async fn unsubscribe_releases_the_handle() {
        let bus = EventBus::default();
        let sub = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        sub.unsubscribe();
        assert_eq!(bus.subscriber_count(), 0);

        // Publishing with no subscribers is a no-op, not an error.
        bus.publish(FeedEvent::Inserted(make_row("r1")));
    }

    #[tokio::test]
    async fn events_before_subscribe_are_not_delivered() {
        let bus = EventBus::default();
        bus.publish(FeedEvent::Inserted(make_row("early")));

        let mut sub = bus.subscribe();
        bus.publish(FeedEvent::Inserted(make_row("late")));

        let FeedEvent::Inserted(row) = sub.recv().await.unwrap();
        assert_eq!(row.id, "late");
    }

    #[tokio::test]
    async fn lagged_subscriber_skips_to_retained_events() {
        let bus = EventBus::with_capacity(2);
        let mut sub = bus.subscribe();

        for i in 0..5 {
            bus.publish(FeedEvent::Inserted(make_row(&format!("r{i}"))));
        }

        // Capacity 2: r0..r2 were dropped, r3 and r4 are retained.
        let FeedEvent::Inserted(row) = sub.recv().await.unwrap();
        assert_eq!(row.id, "r3");
        let FeedEvent::Inserted(row) = sub.recv().await.unwrap();
        assert_eq!(row.id, "r4");
    }

    #[tokio::test]
    async fn recv_returns_none_after_bus_dropped() {
        let bus = EventBus::default();
        let mut sub = bus.subscribe();
        drop(bus);
        assert!(sub.recv().await.is_none());
    }
}
