// SPDX-FileCopyrightText: 2026 Pulso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interaction event queries: append-only insert and recency-ordered reads.

use rusqlite::params;
use uuid::Uuid;

use pulso_core::PulsoError;

use crate::database::Database;
use crate::models::{Interaction, NewInteraction, Platform};

const COLUMNS: &str = "id, platform, event_type, full_name, response, instagram_username, \
                       keyword, comment, whatsapp_id, group_name, metadata, created_at";

/// Insert a normalized event and return the stored row.
///
/// The id (UUID v4) and `created_at` (UTC, millisecond precision) are
/// assigned inside the single serialized write call, and the row is re-read
/// in the same call so generated fields are echoed exactly as stored.
pub async fn insert_interaction(
    db: &Database,
    event: NewInteraction,
) -> Result<Interaction, PulsoError> {
    let id = Uuid::new_v4().to_string();

    let (platform, event_type, full_name, response, instagram_username, keyword, comment, whatsapp_id, group_name, metadata) =
        match event {
            NewInteraction::Instagram(e) => (
                Platform::Instagram.to_string(),
                e.event_type.to_string(),
                e.full_name,
                e.response,
                Some(e.instagram_username),
                Some(e.keyword),
                Some(e.comment),
                None,
                None,
                e.metadata,
            ),
            NewInteraction::Whatsapp(e) => (
                Platform::Whatsapp.to_string(),
                e.event_type.to_string(),
                e.full_name,
                e.response,
                None,
                None,
                None,
                Some(e.whatsapp_id),
                Some(e.group_name),
                e.metadata,
            ),
        };

    let metadata_json = serde_json::to_string(&metadata).map_err(|e| PulsoError::Storage {
        source: Box::new(e),
    })?;

    let row_id = id.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO interactions (id, platform, event_type, full_name, response,
                     instagram_username, keyword, comment, whatsapp_id, group_name,
                     metadata, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                     strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))",
                params![
                    row_id,
                    platform,
                    event_type,
                    full_name,
                    response,
                    instagram_username,
                    keyword,
                    comment,
                    whatsapp_id,
                    group_name,
                    metadata_json,
                ],
            )?;

            let row = conn.query_row(
                &format!("SELECT {COLUMNS} FROM interactions WHERE id = ?1"),
                params![row_id],
                row_to_interaction,
            )?;
            Ok(row)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get stored rows ordered by `created_at` descending (newest first).
pub async fn list_recent(
    db: &Database,
    limit: Option<i64>,
) -> Result<Vec<Interaction>, PulsoError> {
    db.connection()
        .call(move |conn| {
            let mut rows_out = Vec::new();
            match limit {
                Some(lim) => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {COLUMNS} FROM interactions
                         ORDER BY created_at DESC, rowid DESC LIMIT ?1"
                    ))?;
                    let rows = stmt.query_map(params![lim], row_to_interaction)?;
                    for row in rows {
                        rows_out.push(row?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {COLUMNS} FROM interactions
                         ORDER BY created_at DESC, rowid DESC"
                    ))?;
                    let rows = stmt.query_map([], row_to_interaction)?;
                    for row in rows {
                        rows_out.push(row?);
                    }
                }
            }
            Ok(rows_out)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Map one result row onto the domain struct.
fn row_to_interaction(row: &rusqlite::Row<'_>) -> rusqlite::Result<Interaction> {
    let platform: String = row.get(1)?;
    let event_type: String = row.get(2)?;
    let metadata_json: String = row.get(10)?;

    Ok(Interaction {
        id: row.get(0)?,
        platform: platform.parse().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                1,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?,
        event_type: event_type.parse().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?,
        full_name: row.get(3)?,
        response: row.get(4)?,
        instagram_username: row.get(5)?,
        keyword: row.get(6)?,
        comment: row.get(7)?,
        whatsapp_id: row.get(8)?,
        group_name: row.get(9)?,
        metadata: serde_json::from_str(&metadata_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                10,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?,
        created_at: row.get(11)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventType, InstagramEvent, Metadata, WhatsappEvent};
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        (db, dir)
    }

    fn instagram_event(username: &str) -> NewInteraction {
        NewInteraction::Instagram(InstagramEvent {
            event_type: EventType::Comment,
            full_name: "João Silva".to_string(),
            response: "Enviamos os detalhes!".to_string(),
            instagram_username: username.to_string(),
            keyword: "PROMO".to_string(),
            comment: "quero saber mais".to_string(),
            metadata: Metadata::new(),
        })
    }

    fn whatsapp_event() -> NewInteraction {
        NewInteraction::Whatsapp(WhatsappEvent {
            event_type: EventType::GroupJoin,
            full_name: "Maria".to_string(),
            response: "Bem-vinda!".to_string(),
            whatsapp_id: "5511999999999@c.us".to_string(),
            group_name: "Grupo VIP".to_string(),
            metadata: Metadata::new(),
        })
    }

    #[tokio::test]
    async fn insert_returns_stored_row_with_generated_fields() {
        let (db, _dir) = setup_db().await;

        let row = insert_interaction(&db, instagram_event("joao")).await.unwrap();
        assert!(!row.id.is_empty());
        assert!(row.created_at.ends_with('Z'), "created_at: {}", row.created_at);
        assert_eq!(row.platform, Platform::Instagram);
        assert_eq!(row.event_type, EventType::Comment);
        assert_eq!(row.full_name, "João Silva");
        assert_eq!(row.instagram_username.as_deref(), Some("joao"));
        assert_eq!(row.keyword.as_deref(), Some("PROMO"));
        assert_eq!(row.comment.as_deref(), Some("quero saber mais"));
        assert!(row.whatsapp_id.is_none());
        assert!(row.group_name.is_none());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn insert_whatsapp_fills_whatsapp_columns_only() {
        let (db, _dir) = setup_db().await;

        let row = insert_interaction(&db, whatsapp_event()).await.unwrap();
        assert_eq!(row.platform, Platform::Whatsapp);
        assert_eq!(row.event_type, EventType::GroupJoin);
        assert_eq!(row.whatsapp_id.as_deref(), Some("5511999999999@c.us"));
        assert_eq!(row.group_name.as_deref(), Some("Grupo VIP"));
        assert!(row.instagram_username.is_none());
        assert!(row.keyword.is_none());
        assert!(row.comment.is_none());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_events_produce_distinct_rows() {
        let (db, _dir) = setup_db().await;

        let first = insert_interaction(&db, instagram_event("joao")).await.unwrap();
        let second = insert_interaction(&db, instagram_event("joao")).await.unwrap();
        assert_ne!(first.id, second.id);

        let all = list_recent(&db, None).await.unwrap();
        assert_eq!(all.len(), 2);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn metadata_roundtrips_as_json() {
        let (db, _dir) = setup_db().await;

        let mut metadata = Metadata::new();
        metadata.insert("campaign".to_string(), serde_json::json!("spring"));
        metadata.insert("attempt".to_string(), serde_json::json!(2));

        let event = NewInteraction::Instagram(InstagramEvent {
            event_type: EventType::DmSent,
            full_name: "João Silva".to_string(),
            response: "ok".to_string(),
            instagram_username: "joao".to_string(),
            keyword: "PROMO".to_string(),
            comment: "oi".to_string(),
            metadata,
        });

        let row = insert_interaction(&db, event).await.unwrap();
        assert_eq!(row.metadata["campaign"], "spring");
        assert_eq!(row.metadata["attempt"], 2);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn list_recent_orders_newest_first() {
        let (db, _dir) = setup_db().await;

        let first = insert_interaction(&db, instagram_event("a")).await.unwrap();
        let second = insert_interaction(&db, instagram_event("b")).await.unwrap();
        let third = insert_interaction(&db, instagram_event("c")).await.unwrap();

        let all = list_recent(&db, None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, third.id);
        assert_eq!(all[2].id, first.id);

        let capped = list_recent(&db, Some(2)).await.unwrap();
        assert_eq!(capped.len(), 2);
        assert_eq!(capped[0].id, third.id);
        assert_eq!(capped[1].id, second.id);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn list_recent_on_empty_table_returns_empty() {
        let (db, _dir) = setup_db().await;
        let all = list_recent(&db, None).await.unwrap();
        assert!(all.is_empty());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_writers_no_sqlite_busy() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("concurrent_test.db");
        let db = std::sync::Arc::new(
            Database::open(db_path.to_str().unwrap(), true).await.unwrap(),
        );

        // Spawn 10 concurrent tasks all writing through the same Database.
        let mut handles = Vec::new();
        for i in 0..10 {
            let db = db.clone();
            let handle = tokio::spawn(async move {
                insert_interaction(&db, instagram_event(&format!("user-{i}"))).await
            });
            handles.push(handle);
        }

        // All should complete without SQLITE_BUSY.
        for handle in handles {
            let result = handle.await.unwrap();
            assert!(result.is_ok(), "concurrent write failed: {result:?}");
        }

        let all = list_recent(&db, None).await.unwrap();
        assert_eq!(all.len(), 10);

        db.close().await.unwrap();
    }
}
