//! Port interface for the Telegram Bot API

use async_trait::async_trait;
use questlink_domain::Result;

/// Bot API collaborator for community membership lookups.
#[async_trait]
pub trait MembershipGateway: Send + Sync {
    /// Return the member status string for `telegram_user_id` in the
    /// configured channel, or `None` when the API reports the user as
    /// unknown to the chat.
    async fn chat_member_status(&self, telegram_user_id: &str) -> Result<Option<String>>;
}
