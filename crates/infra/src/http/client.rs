//! Shared HTTP client for upstream gateways

use std::time::Duration;

use questlink_domain::{QuestlinkError, Result};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

/// Thin wrapper over reqwest with a fixed timeout.
///
/// No retry layer: every call here sits behind the response cache or a
/// user-facing login flow, and both prefer a fast failure over a
/// multiplied wait.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .user_agent(concat!("questlink/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(map_transport_error)?;
        Ok(Self { client })
    }

    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute a request, mapping transport failures to `Network`.
    ///
    /// Status handling stays with the caller; gateways decide which
    /// upstream statuses are errors and which carry meaning.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(map_transport_error)?;
        debug!(status = %response.status(), "upstream response");
        Ok(response)
    }
}

fn map_transport_error(err: reqwest::Error) -> QuestlinkError {
    // Strip the URL: Telegram bot URLs embed the token in the path.
    QuestlinkError::Network(err.without_url().to_string())
}
