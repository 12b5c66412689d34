//! SQLite connection pool and schema management

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use questlink_domain::{QuestlinkError, Result};
use tracing::info;

/// Owns the connection pool and the schema.
///
/// Repositories hold an `Arc<DbManager>` and check connections out per
/// operation; rusqlite calls run on blocking threads, so the pool is the
/// only synchronization point.
pub struct DbManager {
    pool: Pool<SqliteConnectionManager>,
}

impl DbManager {
    pub fn new(path: &str, pool_size: u32) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = 5000;",
            )
        });

        let pool = Pool::builder()
            .max_size(pool_size)
            .build(manager)
            .map_err(|e| QuestlinkError::Database(format!("connection pool: {e}")))?;

        Ok(Self { pool })
    }

    pub fn get_connection(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|e| QuestlinkError::Database(format!("connection checkout: {e}")))
    }

    /// Create the schema if it does not exist yet. Idempotent.
    pub fn run_migrations(&self) -> Result<()> {
        let conn = self.get_connection()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS linked_identities (
                user_id              TEXT PRIMARY KEY,
                twitter_id           TEXT,
                twitter_username     TEXT,
                twitter_access_token TEXT,
                telegram_id          TEXT,
                telegram_username    TEXT,
                updated_at           INTEGER NOT NULL
             );

             CREATE TABLE IF NOT EXISTS response_cache (
                cache_key   TEXT PRIMARY KEY,
                value       TEXT NOT NULL,
                written_at  INTEGER NOT NULL
             );",
        )
        .map_err(|e| QuestlinkError::Database(format!("migration: {e}")))?;

        info!("database schema ready");
        Ok(())
    }
}
