//! # Questlink Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The OAuth2/PKCE login flow and its ephemeral state store
//! - Telegram widget signature verification
//! - The TTL response cache service
//! - Identity reconciliation and engagement verification
//!
//! ## Architecture Principles
//! - Only depends on `questlink-domain`
//! - No database or HTTP code
//! - All external collaborators via traits (ports)

pub mod auth;
pub mod cache;
pub mod identity;
pub mod telegram;
pub mod verification;

// Re-export specific items to avoid ambiguity
pub use auth::flow::OAuthFlowService;
pub use auth::pkce::PkceChallenge;
pub use auth::state_store::{AuthStateStore, BegunAuthorization, InMemoryAuthStateStore};
pub use auth::OAuthGateway;
pub use cache::{CacheEntry, CacheRepository, ResponseCache};
pub use identity::{IdentityRepository, IdentityService};
pub use telegram::{LoginVerifier, MembershipGateway, TelegramLoginService};
pub use verification::{EngagementGateway, VerificationService};
