//! Telegram widget login service

use std::sync::Arc;

use questlink_domain::types::telegram::{LoginPayload, WidgetLoginOutcome, JOINED_STATUSES};
use questlink_domain::{QuestlinkError, Result};
use serde_json::Value;
use tracing::{info, warn};

use super::ports::MembershipGateway;
use super::verifier::LoginVerifier;
use crate::identity::IdentityService;

/// Handles a login widget submission end to end: verify the signature,
/// link the Telegram identity to the internal user, then report whether
/// the account is a member of the configured community channel.
pub struct TelegramLoginService {
    verifier: LoginVerifier,
    membership: Arc<dyn MembershipGateway>,
    identity: Arc<IdentityService>,
}

impl TelegramLoginService {
    pub fn new(
        verifier: LoginVerifier,
        membership: Arc<dyn MembershipGateway>,
        identity: Arc<IdentityService>,
    ) -> Self {
        Self { verifier, membership, identity }
    }

    pub async fn login(
        &self,
        user_id: &str,
        payload: LoginPayload,
    ) -> Result<WidgetLoginOutcome> {
        if !self.verifier.verify(&payload) {
            warn!(user_id, "widget login rejected");
            return Err(QuestlinkError::InvalidSignature(
                "invalid authentication data".into(),
            ));
        }

        let telegram_id = extract_telegram_id(&payload).ok_or_else(|| {
            QuestlinkError::MalformedRequest("login payload missing id".into())
        })?;
        let username = payload.get("username").and_then(Value::as_str);

        self.identity.attach_telegram(user_id, &telegram_id, username).await?;

        let joined = match self.membership.chat_member_status(&telegram_id).await? {
            Some(status) => JOINED_STATUSES.contains(&status.as_str()),
            None => false,
        };

        info!(user_id, telegram_id, joined, "widget login completed");

        // Echo the verified fields back without the signature.
        let mut user = payload;
        user.remove("hash");
        Ok(WidgetLoginOutcome { joined, user: Value::Object(user) })
    }
}

/// The widget sends `id` as an integer; tolerate a string form as well
/// since proxied payloads often stringify query parameters.
fn extract_telegram_id(payload: &LoginPayload) -> Option<String> {
    match payload.get("id") {
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use hmac::{Hmac, Mac};
    use questlink_domain::types::user::LinkedIdentity;
    use serde_json::{json, Map};
    use sha2::{Digest, Sha256};

    use super::*;
    use crate::identity::IdentityRepository;

    const BOT_TOKEN: &str = "110201543:AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw";

    struct FixedStatusGateway {
        status: Option<String>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MembershipGateway for FixedStatusGateway {
        async fn chat_member_status(&self, telegram_user_id: &str) -> Result<Option<String>> {
            self.calls.lock().unwrap().push(telegram_user_id.to_string());
            Ok(self.status.clone())
        }
    }

    struct InMemoryRepo {
        records: Mutex<Vec<LinkedIdentity>>,
    }

    impl InMemoryRepo {
        fn with_user(user_id: &str) -> Self {
            Self { records: Mutex::new(vec![LinkedIdentity::new(user_id, 0)]) }
        }

        fn get(&self, user_id: &str) -> Option<LinkedIdentity> {
            self.records.lock().unwrap().iter().find(|r| r.user_id == user_id).cloned()
        }
    }

    #[async_trait]
    impl IdentityRepository for InMemoryRepo {
        async fn find_by_user_id(&self, user_id: &str) -> Result<Option<LinkedIdentity>> {
            Ok(self.get(user_id))
        }

        async fn update_twitter(
            &self,
            _user_id: &str,
            _twitter_id: &str,
            _username: &str,
            _access_token: &str,
            _updated_at: i64,
        ) -> Result<()> {
            Ok(())
        }

        async fn update_telegram(
            &self,
            user_id: &str,
            telegram_id: &str,
            username: Option<&str>,
            updated_at: i64,
        ) -> Result<()> {
            let mut records = self.records.lock().unwrap();
            let record = records.iter_mut().find(|r| r.user_id == user_id).unwrap();
            record.telegram_id = Some(telegram_id.into());
            record.telegram_username = username.map(Into::into);
            record.updated_at = updated_at;
            Ok(())
        }
    }

    fn signed_payload() -> LoginPayload {
        let mut payload = Map::new();
        payload.insert("id".into(), json!(987654321));
        payload.insert("first_name".into(), json!("Alice"));
        payload.insert("username".into(), json!("alice_tg"));
        payload.insert("auth_date".into(), json!(Utc::now().timestamp()));

        let secret = Sha256::digest(BOT_TOKEN.as_bytes());
        let mut pairs: Vec<String> = payload
            .iter()
            .map(|(key, value)| match value {
                Value::String(s) => format!("{key}={s}"),
                other => format!("{key}={other}"),
            })
            .collect();
        pairs.sort();
        let mut mac = Hmac::<Sha256>::new_from_slice(&secret).unwrap();
        mac.update(pairs.join("\n").as_bytes());
        payload.insert("hash".into(), json!(hex::encode(mac.finalize().into_bytes())));
        payload
    }

    fn service(
        status: Option<&str>,
    ) -> (TelegramLoginService, Arc<InMemoryRepo>, Arc<FixedStatusGateway>) {
        let repo = Arc::new(InMemoryRepo::with_user("user-1"));
        let gateway = Arc::new(FixedStatusGateway {
            status: status.map(Into::into),
            calls: Mutex::new(Vec::new()),
        });
        let service = TelegramLoginService::new(
            LoginVerifier::new(BOT_TOKEN),
            gateway.clone(),
            Arc::new(IdentityService::new(repo.clone())),
        );
        (service, repo, gateway)
    }

    #[tokio::test]
    async fn test_member_login_links_identity_and_reports_joined() {
        let (service, repo, _) = service(Some("member"));

        let outcome = service.login("user-1", signed_payload()).await.unwrap();

        assert!(outcome.joined);
        assert!(outcome.user.get("hash").is_none());
        assert_eq!(outcome.user["username"], "alice_tg");

        let record = repo.get("user-1").unwrap();
        assert_eq!(record.telegram_id.as_deref(), Some("987654321"));
        assert_eq!(record.telegram_username.as_deref(), Some("alice_tg"));
    }

    #[tokio::test]
    async fn test_left_member_reports_not_joined() {
        let (service, _, _) = service(Some("left"));
        let outcome = service.login("user-1", signed_payload()).await.unwrap();
        assert!(!outcome.joined);
    }

    #[tokio::test]
    async fn test_unknown_member_reports_not_joined() {
        let (service, _, _) = service(None);
        let outcome = service.login("user-1", signed_payload()).await.unwrap();
        assert!(!outcome.joined);
    }

    #[tokio::test]
    async fn test_bad_signature_never_reaches_gateway() {
        let (service, repo, gateway) = service(Some("member"));

        let mut payload = signed_payload();
        payload.insert("username".into(), json!("mallory"));

        let result = service.login("user-1", payload).await;
        assert!(matches!(result, Err(QuestlinkError::InvalidSignature(_))));
        assert!(gateway.calls.lock().unwrap().is_empty());
        assert!(repo.get("user-1").unwrap().telegram_id.is_none());
    }

    #[tokio::test]
    async fn test_unprovisioned_user_fails_precondition() {
        let (service, _, _) = service(Some("member"));
        let result = service.login("ghost", signed_payload()).await;
        assert!(matches!(result, Err(QuestlinkError::Precondition(_))));
    }
}
