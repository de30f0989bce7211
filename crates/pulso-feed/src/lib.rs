// SPDX-FileCopyrightText: 2026 Pulso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Live feed for the Pulso dashboard.
//!
//! Mirrors the interaction table in memory: one bulk read at startup, then
//! one prepend per insertion notification from the bus. Aggregates are pure
//! functions over the mirrored sequence.

pub mod aggregate;
pub mod consumer;
pub mod feed;

pub use aggregate::{DashboardSnapshot, DayBucket, PlatformCounts};
pub use consumer::FeedConsumer;
pub use feed::LiveFeed;
