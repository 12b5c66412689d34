//! Telegram login widget flow
//!
//! Signature verification, identity linking, and the community
//! membership check that gates the widget login response.

pub mod ports;
pub mod service;
pub mod verifier;

pub use ports::MembershipGateway;
pub use service::TelegramLoginService;
pub use verifier::LoginVerifier;
