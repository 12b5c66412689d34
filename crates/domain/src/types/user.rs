//! Linked identity record
//!
//! One row per internal user, joining the provider identities attached so
//! far. Provider fields stay `None` until that provider's flow completes.

use serde::{Deserialize, Serialize};

/// Internal user record with linked provider identities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedIdentity {
    /// Stable internal join key. Pre-provisioned; never created by a login
    /// flow.
    pub user_id: String,
    pub twitter_id: Option<String>,
    pub twitter_username: Option<String>,
    /// OAuth access token from the most recent X login. Never exposed to
    /// browser-facing responses.
    #[serde(skip_serializing)]
    pub twitter_access_token: Option<String>,
    pub telegram_id: Option<String>,
    pub telegram_username: Option<String>,
    /// Unix timestamp of the last successful attach from either provider.
    pub updated_at: i64,
}

impl LinkedIdentity {
    /// Create an empty record for a newly provisioned internal user.
    pub fn new(user_id: impl Into<String>, now: i64) -> Self {
        Self {
            user_id: user_id.into(),
            twitter_id: None,
            twitter_username: None,
            twitter_access_token: None,
            telegram_id: None,
            telegram_username: None,
            updated_at: now,
        }
    }
}
