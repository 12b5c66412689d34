//! Identity reconciliation
//!
//! Merges verified provider identities onto the stored internal user
//! record.

pub mod ports;
pub mod service;

pub use ports::IdentityRepository;
pub use service::IdentityService;
