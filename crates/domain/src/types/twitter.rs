//! X (Twitter) API response types
//!
//! Deserialization targets for the v2 endpoints the service consumes:
//! token exchange, `users/me`, user lookups, and the paginated
//! retweeters/following lists.

use serde::{Deserialize, Serialize};

/// OAuth token response from the X token endpoint (RFC 6749).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_type: String,
    pub expires_in: Option<i64>,
    pub scope: Option<String>,
}

/// OAuth error response from the authorization server (RFC 6749 §5.2).
#[derive(Debug, Deserialize)]
pub struct OAuthErrorResponse {
    pub error: String,
    pub error_description: Option<String>,
}

impl OAuthErrorResponse {
    /// One-line rendering, `error: description` when both are present.
    pub fn detail(&self) -> String {
        match &self.error_description {
            Some(description) => format!("{}: {description}", self.error),
            None => self.error.clone(),
        }
    }
}

/// A user object as returned by the X v2 API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwitterUser {
    pub id: String,
    pub username: String,
    pub name: Option<String>,
    pub public_metrics: Option<PublicMetrics>,
}

/// `public_metrics` sub-object on a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicMetrics {
    pub followers_count: u64,
    pub following_count: Option<u64>,
    pub tweet_count: Option<u64>,
}

impl TwitterUser {
    /// Follower count, treating absent metrics as zero.
    pub fn followers_count(&self) -> u64 {
        self.public_metrics.as_ref().map(|m| m.followers_count).unwrap_or(0)
    }
}

/// Single-user envelope (`{"data": {...}}`).
#[derive(Debug, Deserialize)]
pub struct UserEnvelope {
    pub data: TwitterUser,
}

/// List envelope with pagination metadata
/// (`{"data": [...], "meta": {"next_token": ...}}`).
#[derive(Debug, Deserialize)]
pub struct UserListEnvelope {
    #[serde(default)]
    pub data: Vec<TwitterUser>,
    pub meta: Option<ListMeta>,
}

/// Pagination metadata on list responses.
#[derive(Debug, Deserialize)]
pub struct ListMeta {
    pub next_token: Option<String>,
    pub result_count: Option<u64>,
}

/// Identity resolved from a completed OAuth login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderIdentity {
    pub provider_user_id: String,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_envelope_deserializes() {
        let body = r#"{"data":{"id":"12","username":"alice","name":"Alice",
            "public_metrics":{"followers_count":120,"following_count":80,"tweet_count":44}}}"#;
        let envelope: UserEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.data.id, "12");
        assert_eq!(envelope.data.followers_count(), 120);
    }

    #[test]
    fn test_list_envelope_tolerates_missing_data() {
        let body = r#"{"meta":{"result_count":0}}"#;
        let envelope: UserListEnvelope = serde_json::from_str(body).unwrap();
        assert!(envelope.data.is_empty());
        assert!(envelope.meta.unwrap().next_token.is_none());
    }

    #[test]
    fn test_oauth_error_detail_rendering() {
        let with_description: OAuthErrorResponse = serde_json::from_str(
            r#"{"error":"invalid_grant","error_description":"code expired"}"#,
        )
        .unwrap();
        assert_eq!(with_description.detail(), "invalid_grant: code expired");

        let bare: OAuthErrorResponse = serde_json::from_str(r#"{"error":"invalid_client"}"#).unwrap();
        assert_eq!(bare.detail(), "invalid_client");
    }

    #[test]
    fn test_followers_count_defaults_to_zero() {
        let user = TwitterUser {
            id: "1".into(),
            username: "bob".into(),
            name: None,
            public_metrics: None,
        };
        assert_eq!(user.followers_count(), 0);
    }
}
