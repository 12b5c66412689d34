//! X (Twitter) API gateway
//!
//! One client for both halves of the integration: the OAuth token
//! exchange done with the user's PKCE verifier, and the read-only
//! engagement lookups done with the app bearer token.

use async_trait::async_trait;
use questlink_core::auth::OAuthGateway;
use questlink_core::verification::EngagementGateway;
use questlink_domain::config::TwitterConfig;
use questlink_domain::types::twitter::{
    OAuthErrorResponse, ProviderIdentity, TokenResponse, TwitterUser, UserEnvelope,
    UserListEnvelope,
};
use questlink_domain::{QuestlinkError, Result};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::http::HttpClient;

// Upper bound on pages walked per list; past this the result set is
// too large for a membership scan to be meaningful anyway.
const MAX_PAGES: usize = 50;
const PAGE_SIZE: u32 = 100;

pub struct TwitterGateway {
    http: HttpClient,
    config: TwitterConfig,
}

impl TwitterGateway {
    pub fn new(http: HttpClient, config: TwitterConfig) -> Self {
        Self { http, config }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base_url.trim_end_matches('/'), path)
    }

    fn bearer(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.config.bearer_token)
    }

    async fn get_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.http.send(builder).await?;
        read_json(response).await
    }

    /// Walk a paginated list endpoint to exhaustion.
    async fn collect_pages(&self, url: &str) -> Result<Vec<TwitterUser>> {
        let mut users = Vec::new();
        let mut pagination_token: Option<String> = None;

        for _ in 0..MAX_PAGES {
            let mut builder = self
                .bearer(self.http.request(Method::GET, url))
                .query(&[("max_results", PAGE_SIZE.to_string())]);
            if let Some(token) = &pagination_token {
                builder = builder.query(&[("pagination_token", token)]);
            }

            let page: UserListEnvelope = self.get_json(builder).await?;
            users.extend(page.data);

            pagination_token = page.meta.and_then(|m| m.next_token);
            if pagination_token.is_none() {
                return Ok(users);
            }
        }

        warn!(url, collected = users.len(), "pagination cap reached, result truncated");
        Ok(users)
    }

    async fn lookup_user(&self, path: &str) -> Result<Option<TwitterUser>> {
        let builder = self
            .bearer(self.http.request(Method::GET, self.api_url(path)))
            .query(&[("user.fields", "public_metrics")]);

        let response = self.http.send(builder).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let envelope: UserEnvelope = read_json(response).await?;
        Ok(Some(envelope.data))
    }
}

#[async_trait]
impl OAuthGateway for TwitterGateway {
    async fn exchange_code(&self, code: &str, code_verifier: &str) -> Result<TokenResponse> {
        let mut form = vec![
            ("code", code),
            ("grant_type", "authorization_code"),
            ("client_id", &self.config.client_id),
            ("redirect_uri", &self.config.redirect_uri),
            ("code_verifier", code_verifier),
        ];

        let mut builder =
            self.http.request(Method::POST, self.api_url("oauth2/token")).form(&form);

        // Confidential clients authenticate with Basic auth; public
        // clients only carry client_id in the body.
        if let Some(secret) = &self.config.client_secret {
            form.retain(|(name, _)| *name != "client_id");
            builder = self
                .http
                .request(Method::POST, self.api_url("oauth2/token"))
                .form(&form)
                .basic_auth(&self.config.client_id, Some(secret));
        }

        debug!("exchanging authorization code");
        let response = self.http.send(builder).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| QuestlinkError::Network(e.without_url().to_string()))?;

        if !status.is_success() {
            // Token endpoint rejections come back as an RFC 6749 error
            // body; keep the structured fields when they parse.
            let detail = match serde_json::from_str::<OAuthErrorResponse>(&body) {
                Ok(err) => err.detail(),
                Err(_) => body,
            };
            warn!(status = status.as_u16(), "token exchange rejected");
            return Err(QuestlinkError::Upstream { status: status.as_u16(), body: detail });
        }

        serde_json::from_str(&body)
            .map_err(|e| QuestlinkError::Internal(format!("unexpected response shape: {e}")))
    }

    async fn fetch_identity(&self, access_token: &str) -> Result<ProviderIdentity> {
        let builder = self
            .http
            .request(Method::GET, self.api_url("users/me"))
            .bearer_auth(access_token)
            .query(&[("user.fields", "public_metrics")]);

        let envelope: UserEnvelope = self.get_json(builder).await?;
        Ok(ProviderIdentity {
            provider_user_id: envelope.data.id,
            username: envelope.data.username,
        })
    }
}

#[async_trait]
impl EngagementGateway for TwitterGateway {
    async fn user_by_username(&self, username: &str) -> Result<Option<TwitterUser>> {
        self.lookup_user(&format!("users/by/username/{username}")).await
    }

    async fn user_by_id(&self, user_id: &str) -> Result<Option<TwitterUser>> {
        self.lookup_user(&format!("users/{user_id}")).await
    }

    async fn retweeters(&self, tweet_id: &str) -> Result<Vec<TwitterUser>> {
        self.collect_pages(&self.api_url(&format!("tweets/{tweet_id}/retweeted_by"))).await
    }

    async fn following(&self, user_id: &str) -> Result<Vec<TwitterUser>> {
        self.collect_pages(&self.api_url(&format!("users/{user_id}/following"))).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| QuestlinkError::Network(e.without_url().to_string()))?;

    if !status.is_success() {
        return Err(QuestlinkError::Upstream { status: status.as_u16(), body });
    }

    serde_json::from_str(&body)
        .map_err(|e| QuestlinkError::Internal(format!("unexpected response shape: {e}")))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{
        basic_auth, body_string_contains, header, method, path, query_param,
    };
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn config(server: &MockServer, client_secret: Option<&str>) -> TwitterConfig {
        TwitterConfig {
            client_id: "client-1".into(),
            client_secret: client_secret.map(Into::into),
            redirect_uri: "http://localhost:5000/auth/callback".into(),
            bearer_token: "app-bearer".into(),
            authorization_endpoint: "https://twitter.com/i/oauth2/authorize".into(),
            api_base_url: server.uri(),
            timeout_seconds: 5,
        }
    }

    fn gateway(server: &MockServer, client_secret: Option<&str>) -> TwitterGateway {
        let http = HttpClient::new(Duration::from_secs(5)).expect("http client");
        TwitterGateway::new(http, config(server, client_secret))
    }

    #[tokio::test]
    async fn test_exchange_code_public_client() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("client_id=client-1"))
            .and(body_string_contains("code_verifier=verif"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok",
                "token_type": "bearer",
                "expires_in": 7200,
                "scope": "tweet.read users.read"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let token = gateway(&server, None).exchange_code("abc", "verif").await.expect("token");
        assert_eq!(token.access_token, "tok");
        assert!(token.refresh_token.is_none());
    }

    #[tokio::test]
    async fn test_exchange_code_confidential_client_uses_basic_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .and(basic_auth("client-1", "s3cret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok",
                "token_type": "bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        gateway(&server, Some("s3cret")).exchange_code("abc", "verif").await.expect("token");
    }

    #[tokio::test]
    async fn test_exchange_code_rejection_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "Value passed for the authorization code was invalid."
            })))
            .mount(&server)
            .await;

        let result = gateway(&server, None).exchange_code("bad", "verif").await;
        match result {
            Err(QuestlinkError::Upstream { status, body }) => {
                assert_eq!(status, 400);
                assert_eq!(
                    body,
                    "invalid_grant: Value passed for the authorization code was invalid."
                );
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_exchange_code_rejection_keeps_unstructured_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .mount(&server)
            .await;

        let result = gateway(&server, None).exchange_code("abc", "verif").await;
        match result {
            Err(QuestlinkError::Upstream { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "Service Unavailable");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_identity_uses_user_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .and(header("authorization", "Bearer user-tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"id": "999", "username": "alice", "name": "Alice"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let identity = gateway(&server, None).fetch_identity("user-tok").await.expect("identity");
        assert_eq!(identity.provider_user_id, "999");
        assert_eq!(identity.username, "alice");
    }

    #[tokio::test]
    async fn test_user_lookup_not_found_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/by/username/ghost"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let user = gateway(&server, None).user_by_username("ghost").await.expect("lookup");
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_retweeters_walks_pagination() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tweets/t1/retweeted_by"))
            .and(query_param("pagination_token", "page-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"id": "u2", "username": "bob"}],
                "meta": {"result_count": 1}
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/tweets/t1/retweeted_by"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"id": "u1", "username": "alice"}],
                "meta": {"result_count": 1, "next_token": "page-2"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let users = gateway(&server, None).retweeters("t1").await.expect("retweeters");
        let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["u1", "u2"]);
    }

    #[tokio::test]
    async fn test_rate_limit_surfaces_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/u1/following"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .mount(&server)
            .await;

        let result = gateway(&server, None).following("u1").await;
        assert!(matches!(result, Err(QuestlinkError::Upstream { status: 429, .. })));
    }
}
