//! Port interfaces for the OAuth login flow
//!
//! These traits define the boundary between the flow orchestration and the
//! HTTP infrastructure that talks to the provider.

use async_trait::async_trait;
use questlink_domain::types::twitter::{ProviderIdentity, TokenResponse};
use questlink_domain::Result;

/// Upstream OAuth provider operations used during the callback leg.
#[async_trait]
pub trait OAuthGateway: Send + Sync {
    /// Exchange an authorization code plus PKCE verifier for tokens.
    async fn exchange_code(&self, code: &str, code_verifier: &str) -> Result<TokenResponse>;

    /// Resolve the canonical provider identity for an access token
    /// (the provider's "who am I" endpoint).
    async fn fetch_identity(&self, access_token: &str) -> Result<ProviderIdentity>;
}
