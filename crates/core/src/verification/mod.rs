//! Engagement verification
//!
//! Cached yes/no checks against the X API: retweet, follow, and the
//! follower-count qualification used for quest gating.

pub mod ports;
pub mod service;

pub use ports::EngagementGateway;
pub use service::{FollowCheck, RetweetCheck, SmartFollowerCheck, VerificationService};
