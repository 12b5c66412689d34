//! Port interface for the cache's backing document store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use questlink_domain::Result;
use serde_json::Value;

/// One cached upstream response, keyed by request identity.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: String,
    pub value: Value,
    pub written_at: DateTime<Utc>,
}

/// Document-store collaborator for cached responses.
///
/// Exactly two operations are consumed: a point lookup and an upsert.
/// Staleness is decided by the service, not the store; stale rows are
/// overwritten lazily on the next refetch and never purged, so the table
/// grows with the number of distinct keys.
#[async_trait]
pub trait CacheRepository: Send + Sync {
    /// Fetch the entry for `key`, regardless of age.
    async fn find(&self, key: &str) -> Result<Option<CacheEntry>>;

    /// Insert or replace the entry for `key`.
    async fn upsert(&self, key: &str, value: Value, written_at: DateTime<Utc>) -> Result<()>;
}
