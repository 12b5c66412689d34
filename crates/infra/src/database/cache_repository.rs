//! SQLite-backed response cache repository
//!
//! Timestamps are stored as unix milliseconds; the TTL comparison lives
//! in the core service, so this layer only persists what it is given.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use questlink_core::cache::{CacheEntry, CacheRepository};
use questlink_domain::{QuestlinkError, Result};
use rusqlite::params;
use serde_json::Value;
use tokio::task;

use super::manager::DbManager;
use super::{map_join_error, map_sqlite_error};

pub struct SqliteCacheRepository {
    db: Arc<DbManager>,
}

impl SqliteCacheRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CacheRepository for SqliteCacheRepository {
    async fn find(&self, key: &str) -> Result<Option<CacheEntry>> {
        let db = Arc::clone(&self.db);
        let key = key.to_string();

        task::spawn_blocking(move || -> Result<Option<CacheEntry>> {
            let conn = db.get_connection()?;

            let result = conn.query_row(
                "SELECT value, written_at FROM response_cache WHERE cache_key = ?1",
                params![&key],
                |row| {
                    let value: String = row.get(0)?;
                    let written_at: i64 = row.get(1)?;
                    Ok((value, written_at))
                },
            );

            match result {
                Ok((raw, written_at_ms)) => {
                    let value: Value = serde_json::from_str(&raw).map_err(|e| {
                        QuestlinkError::Database(format!("corrupt cache row {key}: {e}"))
                    })?;
                    let written_at =
                        DateTime::from_timestamp_millis(written_at_ms).ok_or_else(|| {
                            QuestlinkError::Database(format!(
                                "cache row {key} has out-of-range timestamp"
                            ))
                        })?;
                    Ok(Some(CacheEntry { key, value, written_at }))
                }
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(err) => Err(map_sqlite_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn upsert(&self, key: &str, value: Value, written_at: DateTime<Utc>) -> Result<()> {
        let db = Arc::clone(&self.db);
        let key = key.to_string();
        let raw = value.to_string();
        let written_at_ms = written_at.timestamp_millis();

        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO response_cache (cache_key, value, written_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(cache_key) DO UPDATE SET
                    value = excluded.value,
                    written_at = excluded.written_at",
                params![&key, &raw, written_at_ms],
            )
            .map_err(map_sqlite_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}
