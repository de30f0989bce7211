// SPDX-FileCopyrightText: 2026 Pulso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashboard aggregates: pure functions over the in-memory row sequence.
//!
//! Nothing here holds state. Every metric is recomputed from the slice the
//! caller passes in, so the same functions serve the live feed, the stats
//! endpoint, and tests.

use std::collections::HashSet;

use chrono::{DateTime, Days, NaiveDate};
use serde::Serialize;

use pulso_core::{Interaction, Platform};

/// Number of days covered by the trailing histogram, including today.
pub const HISTOGRAM_DAYS: u64 = 7;

/// Per-platform event counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlatformCounts {
    pub instagram: usize,
    pub whatsapp: usize,
}

/// One day of the trailing histogram. Days with zero events are present
/// with a count of 0, never absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayBucket {
    pub day: NaiveDate,
    pub count: usize,
}

/// The full derived dashboard view.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub total: usize,
    pub platforms: PlatformCounts,
    pub unique_users: usize,
    pub unique_keywords: usize,
    pub histogram: Vec<DayBucket>,
}

/// Count events per platform.
pub fn platform_counts(rows: &[Interaction]) -> PlatformCounts {
    let mut counts = PlatformCounts::default();
    for row in rows {
        match row.platform {
            Platform::Instagram => counts.instagram += 1,
            Platform::Whatsapp => counts.whatsapp += 1,
        }
    }
    counts
}

/// Count distinct users.
///
/// Identities are namespaced per platform: an Instagram username and a
/// WhatsApp id with the same string value are two users, not one.
pub fn unique_users(rows: &[Interaction]) -> usize {
    rows.iter()
        .map(|row| (row.platform, row.user_handle()))
        .collect::<HashSet<_>>()
        .len()
}

/// Count distinct trigger keywords across all events that carry one.
pub fn unique_keywords(rows: &[Interaction]) -> usize {
    rows.iter()
        .filter_map(|row| row.keyword.as_deref())
        .collect::<HashSet<_>>()
        .len()
}

/// Bucket events by day over the trailing window ending at `today`.
///
/// Returns exactly [`HISTOGRAM_DAYS`] buckets, oldest first. Rows outside
/// the window or with unparseable timestamps are ignored.
pub fn daily_histogram(rows: &[Interaction], today: NaiveDate) -> Vec<DayBucket> {
    let mut buckets: Vec<DayBucket> = (0..HISTOGRAM_DAYS)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|day| DayBucket { day, count: 0 })
        .collect();

    for row in rows {
        let Some(day) = event_day(row) else { continue };
        if let Some(bucket) = buckets.iter_mut().find(|b| b.day == day) {
            bucket.count += 1;
        }
    }

    buckets
}

/// Keep only the events that occurred on `day`.
pub fn filter_day(rows: &[Interaction], day: NaiveDate) -> Vec<Interaction> {
    rows.iter()
        .filter(|row| event_day(row) == Some(day))
        .cloned()
        .collect()
}

/// One derived-view pass: optional single-day filter, then all aggregates.
pub fn snapshot(rows: &[Interaction], today: NaiveDate, day: Option<NaiveDate>) -> DashboardSnapshot {
    let filtered;
    let rows = match day {
        Some(day) => {
            filtered = filter_day(rows, day);
            filtered.as_slice()
        }
        None => rows,
    };

    DashboardSnapshot {
        total: rows.len(),
        platforms: platform_counts(rows),
        unique_users: unique_users(rows),
        unique_keywords: unique_keywords(rows),
        histogram: daily_histogram(rows, today),
    }
}

/// The UTC calendar day an event was stored on.
fn event_day(row: &Interaction) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(&row.created_at)
        .ok()
        .map(|dt| dt.date_naive())
}
