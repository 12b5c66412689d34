//! TTL response cache
//!
//! Sits in front of rate-limited upstream reads: a stored value is served
//! only while younger than the configured window, otherwise the caller
//! refetches and overwrites.

pub mod ports;
pub mod service;

pub use ports::{CacheEntry, CacheRepository};
pub use service::ResponseCache;
