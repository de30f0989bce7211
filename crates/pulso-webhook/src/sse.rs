// SPDX-FileCopyrightText: 2026 Pulso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server-Sent Events live stream for dashboard subscribers.
//!
//! GET /v1/interactions/stream subscribes the connection to the event bus
//! and emits one event per stored row:
//!
//! ```text
//! event: insert
//! data: {"id": "...", "platform": "instagram", ...}
//! ```
//!
//! The subscription lives as long as the connection: when the client
//! disconnects, the stream (and its bus handle) is dropped.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;

use pulso_bus::FeedEvent;

use crate::server::WebhookState;

/// GET /v1/interactions/stream
pub async fn stream_interactions(
    State(state): State<WebhookState>,
) -> Sse<impl Stream<Item = Result<Event, std::convert::Infallible>>> {
    let sub = state.bus.subscribe();

    let stream = futures::stream::unfold(sub, |mut sub| async move {
        match sub.recv().await {
            Some(FeedEvent::Inserted(row)) => {
                let data =
                    serde_json::to_string(&row).unwrap_or_else(|_| "{}".to_string());
                Some((Ok(Event::default().event("insert").data(data)), sub))
            }
            // Bus dropped: end the stream.
            None => None,
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
