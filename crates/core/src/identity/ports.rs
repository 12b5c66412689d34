//! Port interfaces for identity persistence
//!
//! These traits define the boundary between reconciliation logic and the
//! storage implementation.

use async_trait::async_trait;
use questlink_domain::types::user::LinkedIdentity;
use questlink_domain::Result;

/// Persistence for linked identity records.
///
/// The update methods touch only their own provider's columns so that one
/// provider's flow can never clobber fields the other provider wrote.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Get the identity record for an internal user id.
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<LinkedIdentity>>;

    /// Overwrite the X (Twitter) fields and the updated-at timestamp.
    async fn update_twitter(
        &self,
        user_id: &str,
        twitter_id: &str,
        username: &str,
        access_token: &str,
        updated_at: i64,
    ) -> Result<()>;

    /// Overwrite the Telegram fields and the updated-at timestamp.
    async fn update_telegram(
        &self,
        user_id: &str,
        telegram_id: &str,
        username: Option<&str>,
        updated_at: i64,
    ) -> Result<()>;
}
