//! Identity reconciliation service

use std::sync::Arc;

use chrono::Utc;
use questlink_domain::{QuestlinkError, Result};
use tracing::info;

use super::ports::IdentityRepository;

/// Reconciles verified provider identities onto internal user records.
///
/// Both attach operations require a pre-provisioned record: the service
/// assumes internal users exist before any login flow runs, and a missing
/// row is a hard precondition failure rather than something to silently
/// create.
pub struct IdentityService {
    repository: Arc<dyn IdentityRepository>,
}

impl IdentityService {
    pub fn new(repository: Arc<dyn IdentityRepository>) -> Self {
        Self { repository }
    }

    /// Attach a verified X (Twitter) identity to an internal user.
    pub async fn attach_twitter(
        &self,
        user_id: &str,
        twitter_id: &str,
        username: &str,
        access_token: &str,
    ) -> Result<()> {
        self.require_user(user_id).await?;

        self.repository
            .update_twitter(user_id, twitter_id, username, access_token, Utc::now().timestamp())
            .await?;

        info!(user_id, twitter_id, "twitter identity attached");
        Ok(())
    }

    /// Attach a verified Telegram identity to an internal user.
    pub async fn attach_telegram(
        &self,
        user_id: &str,
        telegram_id: &str,
        username: Option<&str>,
    ) -> Result<()> {
        self.require_user(user_id).await?;

        self.repository
            .update_telegram(user_id, telegram_id, username, Utc::now().timestamp())
            .await?;

        info!(user_id, telegram_id, "telegram identity attached");
        Ok(())
    }

    async fn require_user(&self, user_id: &str) -> Result<()> {
        match self.repository.find_by_user_id(user_id).await? {
            Some(_) => Ok(()),
            None => Err(QuestlinkError::Precondition(format!(
                "internal user {user_id} is not provisioned"
            ))),
        }
    }
}
