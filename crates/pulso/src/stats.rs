// SPDX-FileCopyrightText: 2026 Pulso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pulso stats` command implementation.
//!
//! Opens the configured database read-style (same single-writer handle,
//! no server) and prints the dashboard aggregates.

use pulso_bus::EventBus;
use pulso_config::model::PulsoConfig;
use pulso_core::{EventStore, PulsoError};
use pulso_feed::aggregate;
use pulso_storage::SqliteEventStore;

/// Run the `pulso stats` command.
pub async fn run_stats(config: &PulsoConfig) -> Result<(), PulsoError> {
    let store = SqliteEventStore::new(config.storage.clone(), EventBus::default());
    store.initialize().await?;

    let rows = store.list_recent(None).await?;
    let today = chrono::Utc::now().date_naive();
    let snapshot = aggregate::snapshot(&rows, today, None);

    println!("interactions: {}", snapshot.total);
    println!("  instagram:  {}", snapshot.platforms.instagram);
    println!("  whatsapp:   {}", snapshot.platforms.whatsapp);
    println!("unique users:    {}", snapshot.unique_users);
    println!("unique keywords: {}", snapshot.unique_keywords);
    println!("last {} days:", aggregate::HISTOGRAM_DAYS);
    for bucket in &snapshot.histogram {
        println!("  {}  {}", bucket.day, bucket.count);
    }

    store.close().await?;
    Ok(())
}
