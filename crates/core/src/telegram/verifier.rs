//! Telegram login widget signature verification
//!
//! The widget signs its payload with HMAC-SHA256 under a key derived from
//! the bot token (https://core.telegram.org/widgets/login#checking-authorization).
//! Verification recomputes the signature over a canonical check-string and
//! compares in constant time.

use hmac::{Hmac, Mac};
use questlink_domain::constants::MAX_LOGIN_PAYLOAD_AGE_SECONDS;
use questlink_domain::types::telegram::LoginPayload;
use serde_json::Value;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// Verifies login widget payloads against the bot's signing key.
///
/// The key is `SHA256(bot_token)` with surrounding whitespace trimmed from
/// the token first; a trailing newline from an env file would otherwise
/// reject every login.
pub struct LoginVerifier {
    secret: [u8; 32],
    max_age_seconds: i64,
}

impl LoginVerifier {
    pub fn new(bot_token: &str) -> Self {
        Self {
            secret: Sha256::digest(bot_token.trim().as_bytes()).into(),
            max_age_seconds: MAX_LOGIN_PAYLOAD_AGE_SECONDS,
        }
    }

    /// Check the payload's signature and freshness.
    ///
    /// Returns `false` for any defect: missing or mismatched `hash`, a
    /// missing or non-numeric `auth_date`, or a payload older than the
    /// acceptance window. Callers get a single bit so the reason for a
    /// rejection never leaks to the client.
    pub fn verify(&self, payload: &LoginPayload) -> bool {
        let Some(provided_hash) = payload.get("hash").and_then(Value::as_str) else {
            debug!("login payload has no hash field");
            return false;
        };

        let expected = self.compute_hash(payload);
        if !bool::from(expected.as_bytes().ct_eq(provided_hash.as_bytes())) {
            debug!("login payload signature mismatch");
            return false;
        }

        self.is_fresh(payload)
    }

    fn compute_hash(&self, payload: &LoginPayload) -> String {
        let mut pairs: Vec<String> = payload
            .iter()
            .filter(|(key, value)| key.as_str() != "hash" && !value.is_null())
            .map(|(key, value)| format!("{key}={}", coerce_value(value)))
            .collect();
        pairs.sort();
        let check_string = pairs.join("\n");

        // Key length is fixed at 32 bytes, so construction cannot fail.
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .unwrap_or_else(|_| unreachable!("HMAC accepts any key length"));
        mac.update(check_string.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    // Freshness only applies when the payload carries an issuance
    // timestamp; a signed payload without one is accepted. A present but
    // unusable auth_date is still a rejection.
    fn is_fresh(&self, payload: &LoginPayload) -> bool {
        let auth_date = match payload.get("auth_date") {
            None => return true,
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.parse::<i64>().ok(),
            Some(_) => None,
        };
        let Some(auth_date) = auth_date else {
            debug!("login payload auth_date is not a timestamp");
            return false;
        };

        let age = chrono::Utc::now().timestamp() - auth_date;
        if age > self.max_age_seconds {
            debug!(age, "login payload expired");
            return false;
        }
        true
    }
}

/// Widget fields arrive as strings or integers; both sign as their plain
/// textual form, without JSON quoting.
fn coerce_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
