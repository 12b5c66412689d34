//! Domain constants shared across crates

/// Default time-to-live for cached upstream responses (15 minutes).
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 15 * 60;

/// Maximum accepted age of a Telegram widget login payload (1 day).
pub const MAX_LOGIN_PAYLOAD_AGE_SECONDS: i64 = 86_400;

/// OAuth scopes requested from the X API.
pub const TWITTER_OAUTH_SCOPES: &[&str] =
    &["tweet.read", "users.read", "follows.read", "offline.access"];

/// Default follower threshold for the smart-follower check.
pub const DEFAULT_MIN_FOLLOWERS: u64 = 50;

/// Timeout applied to every outbound provider call (seconds).
pub const UPSTREAM_TIMEOUT_SECONDS: u64 = 30;
