// SPDX-FileCopyrightText: 2026 Pulso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the EventStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use pulso_bus::{EventBus, FeedEvent};
use pulso_config::model::StorageConfig;
use pulso_core::{EventStore, Interaction, NewInteraction, PulsoError};

use crate::database::Database;
use crate::queries;

/// SQLite-backed event store.
///
/// Wraps a [`Database`] handle and delegates query operations to the typed
/// query module. The database is lazily initialized on the first call to
/// [`initialize`](Self::initialize). Every successful insert is announced
/// on the event bus so live feed consumers see new rows without polling.
pub struct SqliteEventStore {
    config: StorageConfig,
    bus: EventBus,
    db: OnceCell<Database>,
}

impl SqliteEventStore {
    /// Create a new SqliteEventStore with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`](Self::initialize)
    /// is called.
    pub fn new(config: StorageConfig, bus: EventBus) -> Self {
        Self {
            config,
            bus,
            db: OnceCell::new(),
        }
    }

    /// Open the database at the configured path and run migrations.
    pub async fn initialize(&self) -> Result<(), PulsoError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| PulsoError::Storage {
            source: "store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite event store initialized");
        Ok(())
    }

    /// Checkpoint the WAL and release the connection.
    pub async fn close(&self) -> Result<(), PulsoError> {
        let db = self.db()?;
        db.close().await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    /// Verify the database answers queries.
    pub async fn health_check(&self) -> Result<(), PulsoError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, PulsoError> {
        self.db.get().ok_or_else(|| PulsoError::Storage {
            source: "store not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl EventStore for SqliteEventStore {
    async fn insert(&self, event: NewInteraction) -> Result<Interaction, PulsoError> {
        let row = queries::interactions::insert_interaction(self.db()?, event).await?;
        self.bus.publish(FeedEvent::Inserted(row.clone()));
        Ok(row)
    }

    async fn list_recent(&self, limit: Option<i64>) -> Result<Vec<Interaction>, PulsoError> {
        queries::interactions::list_recent(self.db()?, limit).await
    }
}
