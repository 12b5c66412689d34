//! Port interface for upstream engagement data

use async_trait::async_trait;
use questlink_domain::types::twitter::TwitterUser;
use questlink_domain::Result;

/// Read-only X (Twitter) API collaborator for engagement checks.
///
/// List methods return the full result set; pagination is the gateway's
/// concern and callers never see page boundaries.
#[async_trait]
pub trait EngagementGateway: Send + Sync {
    /// Look up a user by handle, including public metrics.
    async fn user_by_username(&self, username: &str) -> Result<Option<TwitterUser>>;

    /// Look up a user by id, including public metrics.
    async fn user_by_id(&self, user_id: &str) -> Result<Option<TwitterUser>>;

    /// Every user that retweeted the given tweet.
    async fn retweeters(&self, tweet_id: &str) -> Result<Vec<TwitterUser>>;

    /// Every account the given user follows.
    async fn following(&self, user_id: &str) -> Result<Vec<TwitterUser>>;
}
