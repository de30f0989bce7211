// SPDX-FileCopyrightText: 2026 Pulso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event store trait for persistence backends.

use async_trait::async_trait;

use crate::error::PulsoError;
use crate::types::{Interaction, NewInteraction};

/// Adapter for the durable, queryable interaction event store.
///
/// The store owns id and timestamp assignment: both are generated
/// atomically with the write, and the complete stored row is returned so
/// callers can echo generated fields back to the webhook caller.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Inserts one normalized event. Returns the stored row, including the
    /// generated `id` and `created_at`.
    ///
    /// Inserts are never deduplicated: submitting the same event twice
    /// produces two rows with distinct ids.
    async fn insert(&self, event: NewInteraction) -> Result<Interaction, PulsoError>;

    /// Returns stored rows ordered by `created_at` descending (newest
    /// first), optionally capped at `limit`.
    async fn list_recent(&self, limit: Option<i64>) -> Result<Vec<Interaction>, PulsoError>;
}
