// SPDX-FileCopyrightText: 2026 Pulso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The live feed state container.
//!
//! Two input events mutate the feed: `load` (bulk-load-complete) and `push`
//! (row-inserted). Everything derived from the feed is a pure function over
//! the row slice (see [`crate::aggregate`]); there is no other state machine.
//!
//! The feed does not deduplicate. A row that is both part of the bulk read
//! and delivered as an insertion notification after the load appears twice,
//! keeping the fetch/subscription race observable instead of papering over
//! it.

use pulso_core::Interaction;

/// Ordered in-memory mirror of the interaction table, most recent first.
#[derive(Debug, Default)]
pub struct LiveFeed {
    rows: Vec<Interaction>,
}

impl LiveFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a completed bulk read. Replaces the current contents; the
    /// input is expected to already be ordered newest first.
    pub fn load(&mut self, rows: Vec<Interaction>) {
        self.rows = rows;
    }

    /// Apply one insertion notification: prepend, no re-sort, no dedup.
    pub fn push(&mut self, row: Interaction) {
        self.rows.insert(0, row);
    }

    /// Current sequence, newest first.
    pub fn rows(&self) -> &[Interaction] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulso_core::{EventType, Metadata, Platform};

    fn make_row(id: &str, created_at: &str) -> Interaction {
        Interaction {
            id: id.to_string(),
            platform: Platform::Instagram,
            event_type: EventType::Comment,
            full_name: "João Silva".to_string(),
            response: "ok".to_string(),
            instagram_username: Some("joao".to_string()),
            keyword: Some("PROMO".to_string()),
            comment: Some("oi".to_string()),
            whatsapp_id: None,
            group_name: None,
            metadata: Metadata::new(),
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn load_replaces_contents() {
        let mut feed = LiveFeed::new();
        feed.push(make_row("stale", "2026-01-01T00:00:00.000Z"));

        feed.load(vec![
            make_row("b", "2026-01-02T00:00:00.000Z"),
            make_row("a", "2026-01-01T00:00:00.000Z"),
        ]);
        assert_eq!(feed.len(), 2);
        assert_eq!(feed.rows()[0].id, "b");
    }

    #[test]
    fn push_prepends_newest() {
        let mut feed = LiveFeed::new();
        feed.load(vec![make_row("a", "2026-01-01T00:00:00.000Z")]);
        feed.push(make_row("b", "2026-01-02T00:00:00.000Z"));

        assert_eq!(feed.rows()[0].id, "b");
        assert_eq!(feed.rows()[1].id, "a");
    }

    #[test]
    fn no_deduplication_against_bulk_load() {
        // The fetch/subscription race: a row present in the bulk read and
        // then delivered as a notification shows up twice.
        let mut feed = LiveFeed::new();
        let row = make_row("dup", "2026-01-01T00:00:00.000Z");
        feed.load(vec![row.clone()]);
        feed.push(row);

        assert_eq!(feed.len(), 2);
        assert_eq!(feed.rows()[0].id, "dup");
        assert_eq!(feed.rows()[1].id, "dup");
    }
}
