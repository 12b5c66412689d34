//! OAuth authorization-code flow orchestration
//!
//! Drives one login attempt end to end: mint PKCE material and state,
//! build the provider redirect, and on callback consume the state entry,
//! exchange the code, resolve the identity, and reconcile it onto the
//! internal user record.

use std::sync::Arc;

use questlink_domain::types::twitter::ProviderIdentity;
use questlink_domain::{QuestlinkError, Result};
use tracing::{info, warn};

use super::ports::OAuthGateway;
use super::state_store::AuthStateStore;
use crate::identity::IdentityService;

/// Static settings for building authorization redirects.
#[derive(Debug, Clone)]
pub struct OAuthFlowSettings {
    pub authorization_endpoint: String,
    pub client_id: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
}

impl OAuthFlowSettings {
    /// Scopes as the space-separated string the provider expects.
    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }
}

/// OAuth login flow service
pub struct OAuthFlowService {
    settings: OAuthFlowSettings,
    state_store: Arc<dyn AuthStateStore>,
    gateway: Arc<dyn OAuthGateway>,
    identities: Arc<IdentityService>,
}

impl OAuthFlowService {
    pub fn new(
        settings: OAuthFlowSettings,
        state_store: Arc<dyn AuthStateStore>,
        gateway: Arc<dyn OAuthGateway>,
        identities: Arc<IdentityService>,
    ) -> Self {
        Self { settings, state_store, gateway, identities }
    }

    /// Start a login attempt for an internal user.
    ///
    /// Registers the attempt in the state store and returns the provider
    /// authorization URL to redirect the browser to. Any failure here
    /// aborts the request before a redirect is issued.
    pub async fn start_login(&self, user_id: &str) -> Result<String> {
        let begun = self.state_store.begin(user_id).await?;

        let params = [
            ("response_type", "code"),
            ("client_id", self.settings.client_id.as_str()),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
            ("scope", &self.settings.scope_string()),
            ("state", begun.state.as_str()),
            ("code_challenge", begun.code_challenge.as_str()),
            ("code_challenge_method", "S256"),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let url = format!("{}?{}", self.settings.authorization_endpoint, query_string);

        info!(user_id, "authorization redirect issued");
        Ok(url)
    }

    /// Handle the provider callback: consume the state entry, exchange the
    /// code, fetch the identity, and attach it to the initiating user.
    ///
    /// A state that was never issued, already consumed, or lost to a
    /// restart fails with `InvalidState` before any exchange is attempted;
    /// retried callbacks are rejected, not re-executed.
    pub async fn handle_callback(&self, state: &str, code: &str) -> Result<ProviderIdentity> {
        let pending = match self.state_store.complete(state).await {
            Some(pending) => pending,
            None => {
                warn!("callback with unknown or already-consumed state");
                return Err(QuestlinkError::InvalidState);
            }
        };

        let tokens = self.gateway.exchange_code(code, &pending.code_verifier).await?;
        let identity = self.gateway.fetch_identity(&tokens.access_token).await?;

        self.identities
            .attach_twitter(
                &pending.user_id,
                &identity.provider_user_id,
                &identity.username,
                &tokens.access_token,
            )
            .await?;

        info!(
            user_id = %pending.user_id,
            provider_user_id = %identity.provider_user_id,
            "login completed and identity attached"
        );
        Ok(identity)
    }
}
