//! SQLite persistence

pub mod cache_repository;
pub mod identity_repository;
pub mod manager;

pub use cache_repository::SqliteCacheRepository;
pub use identity_repository::SqliteIdentityRepository;
pub use manager::DbManager;

use questlink_domain::QuestlinkError;
use tokio::task::JoinError;

pub(crate) fn map_sqlite_error(err: rusqlite::Error) -> QuestlinkError {
    QuestlinkError::Database(format!("SQLite error: {err}"))
}

pub(crate) fn map_join_error(err: JoinError) -> QuestlinkError {
    QuestlinkError::Internal(format!("task join error: {err}"))
}
