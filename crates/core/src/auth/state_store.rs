//! Ephemeral authorization state store
//!
//! Maps the one-time state token to the PKCE verifier (and the internal
//! user who started the attempt) between the redirect and the callback.
//! Entries are single-use: `complete` atomically removes on read, so two
//! racing callbacks with the same state can never both succeed; that
//! check-and-delete is the flow's CSRF/session-fixation guard.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use questlink_domain::Result;

use super::pkce::PkceChallenge;

/// A pending authorization attempt, created at `begin` and consumed at
/// `complete`.
#[derive(Debug, Clone)]
pub struct PendingAuthorization {
    pub code_verifier: String,
    /// Internal user who initiated the login; the callback binds the
    /// provider identity back to this record.
    pub user_id: String,
    pub issued_at: DateTime<Utc>,
}

/// What `begin` hands back for building the authorization redirect.
#[derive(Debug, Clone)]
pub struct BegunAuthorization {
    pub state: String,
    pub code_challenge: String,
}

/// Storage for in-flight authorization attempts.
///
/// Injected wherever the flow needs it, so a clustered deployment can swap
/// in a shared backend without touching the flow logic. Implementations
/// must guarantee that no two `complete` calls succeed for the same state.
#[async_trait]
pub trait AuthStateStore: Send + Sync {
    /// Mint a fresh verifier/challenge pair and state token, record
    /// state -> (verifier, user), and return what the redirect URL needs.
    async fn begin(&self, user_id: &str) -> Result<BegunAuthorization>;

    /// Atomically look up and remove the pending attempt for `state`.
    ///
    /// Returns `None` for unknown, forged, or already-consumed states.
    async fn complete(&self, state: &str) -> Option<PendingAuthorization>;
}

/// Process-local state store backed by a concurrent map.
///
/// Entries live until consumed or until the process exits; a restart
/// invalidates all in-flight logins, which must then be restarted.
#[derive(Debug, Default)]
pub struct InMemoryAuthStateStore {
    pending: DashMap<String, PendingAuthorization>,
}

impl InMemoryAuthStateStore {
    pub fn new() -> Self {
        Self { pending: DashMap::new() }
    }

    /// Number of attempts currently awaiting a callback.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[async_trait]
impl AuthStateStore for InMemoryAuthStateStore {
    async fn begin(&self, user_id: &str) -> Result<BegunAuthorization> {
        let challenge = PkceChallenge::generate();

        self.pending.insert(
            challenge.state.clone(),
            PendingAuthorization {
                code_verifier: challenge.code_verifier,
                user_id: user_id.to_string(),
                issued_at: Utc::now(),
            },
        );

        Ok(BegunAuthorization { state: challenge.state, code_challenge: challenge.code_challenge })
    }

    async fn complete(&self, state: &str) -> Option<PendingAuthorization> {
        // DashMap::remove is the atomic check-and-delete
        self.pending.remove(state).map(|(_, pending)| pending)
    }
}
