//! TTL cache service

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use questlink_domain::Result;
use serde_json::Value;
use tracing::debug;

use super::ports::CacheRepository;

/// Time-bounded read-through cache over a document store.
///
/// `get` treats a stale entry exactly like an absent one: callers cannot
/// distinguish expiry from never-written. `put` is an upsert with a fresh
/// timestamp; concurrent puts to the same key race last-write-wins, which
/// is acceptable because values are idempotent refetches of the same
/// upstream resource.
pub struct ResponseCache {
    repository: Arc<dyn CacheRepository>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(repository: Arc<dyn CacheRepository>, ttl: Duration) -> Self {
        Self { repository, ttl }
    }

    /// Return the cached value for `key` if present and younger than the
    /// TTL window.
    pub async fn get(&self, key: &str) -> Result<Option<Value>> {
        let Some(entry) = self.repository.find(key).await? else {
            debug!(key, "cache miss");
            return Ok(None);
        };

        let age = Utc::now().signed_duration_since(entry.written_at);
        if age.num_milliseconds() < 0 || age.to_std().map_or(true, |age| age >= self.ttl) {
            debug!(key, "cache entry stale");
            return Ok(None);
        }

        debug!(key, "cache hit");
        Ok(Some(entry.value))
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub async fn put(&self, key: &str, value: Value) -> Result<()> {
        self.repository.upsert(key, value, Utc::now()).await
    }
}
