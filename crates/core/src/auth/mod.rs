//! OAuth 2.0 login flow with PKCE
//!
//! Implements RFC 7636 challenge generation, the per-attempt state store,
//! and the authorization-code exchange orchestration.

pub mod flow;
pub mod pkce;
pub mod ports;
pub mod state_store;

pub use flow::OAuthFlowService;
pub use ports::OAuthGateway;
pub use state_store::{AuthStateStore, InMemoryAuthStateStore};
