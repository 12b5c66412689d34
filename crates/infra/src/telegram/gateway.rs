//! Telegram Bot API gateway

use async_trait::async_trait;
use questlink_core::telegram::MembershipGateway;
use questlink_domain::config::TelegramConfig;
use questlink_domain::types::telegram::ChatMemberEnvelope;
use questlink_domain::{QuestlinkError, Result};
use reqwest::Method;
use tracing::debug;

use crate::http::HttpClient;

pub struct TelegramGateway {
    http: HttpClient,
    config: TelegramConfig,
}

impl TelegramGateway {
    pub fn new(http: HttpClient, config: TelegramConfig) -> Self {
        Self { http, config }
    }

    // The bot token is part of the URL path; this value must never be
    // logged or embedded in error payloads.
    fn method_url(&self, bot_method: &str) -> String {
        format!(
            "{}/bot{}/{bot_method}",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.bot_token.trim()
        )
    }
}

#[async_trait]
impl MembershipGateway for TelegramGateway {
    async fn chat_member_status(&self, telegram_user_id: &str) -> Result<Option<String>> {
        let builder = self
            .http
            .request(Method::GET, self.method_url("getChatMember"))
            .query(&[("chat_id", self.config.channel_id.as_str()), ("user_id", telegram_user_id)]);

        let response = self.http.send(builder).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| QuestlinkError::Network(e.without_url().to_string()))?;

        // The Bot API answers 400 with ok=false when the user has never
        // touched the chat; that is a plain "not a member", not a fault.
        if let Ok(envelope) = serde_json::from_str::<ChatMemberEnvelope>(&body) {
            if envelope.ok {
                return Ok(envelope.result.map(|m| m.status));
            }
            if status.as_u16() == 400 {
                debug!(telegram_user_id, "user unknown to chat");
                return Ok(None);
            }
            return Err(QuestlinkError::Upstream {
                status: status.as_u16(),
                body: envelope.description.unwrap_or_else(|| "telegram api error".into()),
            });
        }

        Err(QuestlinkError::Upstream { status: status.as_u16(), body })
    }
}
