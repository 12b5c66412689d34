//! SQLite-backed identity repository

use std::sync::Arc;

use async_trait::async_trait;
use questlink_core::identity::IdentityRepository;
use questlink_domain::types::user::LinkedIdentity;
use questlink_domain::Result;
use rusqlite::{params, Row};
use tokio::task;

use super::manager::DbManager;
use super::{map_join_error, map_sqlite_error};

pub struct SqliteIdentityRepository {
    db: Arc<DbManager>,
}

impl SqliteIdentityRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Create an internal user record if it does not exist.
    ///
    /// Provisioning happens out of band (account creation precedes any
    /// provider login); this exists so deployments and tests can seed
    /// records without raw SQL.
    pub async fn provision(&self, user_id: &str, now: i64) -> Result<()> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();

        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO linked_identities (user_id, updated_at) VALUES (?1, ?2)
                 ON CONFLICT(user_id) DO NOTHING",
                params![&user_id, now],
            )
            .map_err(map_sqlite_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl IdentityRepository for SqliteIdentityRepository {
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<LinkedIdentity>> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();

        task::spawn_blocking(move || -> Result<Option<LinkedIdentity>> {
            let conn = db.get_connection()?;

            let result = conn.query_row(
                "SELECT user_id, twitter_id, twitter_username, twitter_access_token,
                        telegram_id, telegram_username, updated_at
                 FROM linked_identities WHERE user_id = ?1",
                params![&user_id],
                map_identity_row,
            );

            match result {
                Ok(identity) => Ok(Some(identity)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(err) => Err(map_sqlite_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update_twitter(
        &self,
        user_id: &str,
        twitter_id: &str,
        username: &str,
        access_token: &str,
        updated_at: i64,
    ) -> Result<()> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();
        let twitter_id = twitter_id.to_string();
        let username = username.to_string();
        let access_token = access_token.to_string();

        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "UPDATE linked_identities
                 SET twitter_id = ?1, twitter_username = ?2, twitter_access_token = ?3,
                     updated_at = ?4
                 WHERE user_id = ?5",
                params![&twitter_id, &username, &access_token, updated_at, &user_id],
            )
            .map_err(map_sqlite_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update_telegram(
        &self,
        user_id: &str,
        telegram_id: &str,
        username: Option<&str>,
        updated_at: i64,
    ) -> Result<()> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();
        let telegram_id = telegram_id.to_string();
        let username = username.map(str::to_string);

        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "UPDATE linked_identities
                 SET telegram_id = ?1, telegram_username = ?2, updated_at = ?3
                 WHERE user_id = ?4",
                params![&telegram_id, &username, updated_at, &user_id],
            )
            .map_err(map_sqlite_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_identity_row(row: &Row<'_>) -> rusqlite::Result<LinkedIdentity> {
    Ok(LinkedIdentity {
        user_id: row.get(0)?,
        twitter_id: row.get(1)?,
        twitter_username: row.get(2)?,
        twitter_access_token: row.get(3)?,
        telegram_id: row.get(4)?,
        telegram_username: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
