// SPDX-FileCopyrightText: 2026 Pulso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Background consumer wiring the event store and the bus into a live feed.
//!
//! Startup order matters: the bus subscription is established before the
//! bulk read, so an insert landing between the two is never lost -- it is
//! buffered and applied after the load. The same ordering means a row can
//! appear both in the bulk result and as a buffered notification; the feed
//! keeps both (see [`crate::feed::LiveFeed`]).

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use pulso_bus::{EventBus, FeedEvent};
use pulso_core::{EventStore, Interaction, PulsoError};

use crate::feed::LiveFeed;

/// Owns the live feed and the background task that keeps it current.
pub struct FeedConsumer {
    feed: Arc<RwLock<LiveFeed>>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl FeedConsumer {
    /// Subscribe to insertion notifications, perform the initial bulk read,
    /// and start pumping notifications into the feed.
    ///
    /// If the bulk read fails, the error is returned, the subscription is
    /// released, and no task is left running.
    pub async fn start(
        store: Arc<dyn EventStore>,
        bus: &EventBus,
    ) -> Result<Self, PulsoError> {
        let mut sub = bus.subscribe();
        let rows = store.list_recent(None).await?;

        let feed = Arc::new(RwLock::new(LiveFeed::new()));
        feed.write().await.load(rows);

        let cancel = CancellationToken::new();
        let task = tokio::spawn({
            let feed = Arc::clone(&feed);
            let cancel = cancel.clone();
            async move {
                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        event = sub.recv() => match event {
                            Some(FeedEvent::Inserted(row)) => {
                                feed.write().await.push(row);
                            }
                            None => break,
                        },
                    }
                }
                debug!("feed consumer task stopped");
            }
        });

        Ok(Self { feed, cancel, task })
    }

    /// Copy of the current sequence, newest first.
    pub async fn snapshot(&self) -> Vec<Interaction> {
        self.feed.read().await.rows().to_vec()
    }

    /// Cancel the pump task and release the subscription.
    pub async fn stop(self) {
        self.cancel.cancel();
        let _ = self.task.await;
    }
}
