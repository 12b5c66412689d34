//! Configuration management
//!
//! Settings are read from the environment (a `.env` file is loaded by the
//! binary before these run). Secrets are never serialized back out.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CACHE_TTL_SECONDS, UPSTREAM_TIMEOUT_SECONDS};
use crate::errors::{QuestlinkError, Result};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub twitter: TwitterConfig,
    pub telegram: TelegramConfig,
    pub cache: CacheConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    /// Base URL of the application frontend that callback redirects land on.
    pub frontend_url: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

/// X (Twitter) OAuth and API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitterConfig {
    pub client_id: String,
    /// Present for confidential clients; public clients leave this unset
    /// and authenticate the token exchange via the request body only.
    #[serde(skip_serializing)]
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    /// App-level bearer token used for read-only engagement lookups.
    #[serde(skip_serializing)]
    pub bearer_token: String,
    pub authorization_endpoint: String,
    pub api_base_url: String,
    pub timeout_seconds: u64,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(skip_serializing)]
    pub bot_token: String,
    pub channel_id: String,
    pub api_base_url: String,
    pub timeout_seconds: u64,
}

/// Response cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub ttl_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 5000, frontend_url: "http://localhost:3000".to_string() }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: "questlink.db".to_string(), pool_size: 8 }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_seconds: DEFAULT_CACHE_TTL_SECONDS }
    }
}

impl Config {
    /// Build configuration from environment variables.
    ///
    /// Missing provider credentials are a hard configuration error; optional
    /// settings fall back to defaults.
    pub fn from_env() -> Result<Self> {
        let server = ServerConfig {
            port: env_parsed("PORT").unwrap_or(5000),
            frontend_url: env_or("FRONTEND_URL", "http://localhost:3000"),
        };

        let database = DatabaseConfig {
            path: env_or("DATABASE_PATH", "questlink.db"),
            pool_size: env_parsed("DATABASE_POOL_SIZE").unwrap_or(8),
        };

        let twitter = TwitterConfig {
            client_id: require_env("X_CLIENT_ID")?,
            client_secret: std::env::var("X_CLIENT_SECRET").ok().filter(|s| !s.is_empty()),
            redirect_uri: env_or("X_REDIRECT_URI", "http://localhost:5000/auth/callback"),
            bearer_token: require_env("X_BEARER_TOKEN")?,
            authorization_endpoint: env_or(
                "X_AUTHORIZATION_ENDPOINT",
                "https://twitter.com/i/oauth2/authorize",
            ),
            api_base_url: env_or("X_API_BASE_URL", "https://api.x.com/2"),
            timeout_seconds: env_parsed("X_TIMEOUT_SECONDS").unwrap_or(UPSTREAM_TIMEOUT_SECONDS),
        };

        let telegram = TelegramConfig {
            bot_token: require_env("TELEGRAM_BOT_TOKEN")?,
            channel_id: require_env("TELEGRAM_CHANNEL_ID")?,
            api_base_url: env_or("TELEGRAM_API_BASE_URL", "https://api.telegram.org"),
            timeout_seconds: env_parsed("TELEGRAM_TIMEOUT_SECONDS")
                .unwrap_or(UPSTREAM_TIMEOUT_SECONDS),
        };

        let cache = CacheConfig {
            ttl_seconds: env_parsed("CACHE_TTL_SECONDS").unwrap_or(DEFAULT_CACHE_TTL_SECONDS),
        };

        Ok(Self { server, database, twitter, telegram, cache })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).ok().filter(|s| !s.is_empty()).unwrap_or_else(|| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| QuestlinkError::Config(format!("missing environment variable {key}")))
}
