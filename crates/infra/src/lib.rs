//! # Questlink Infrastructure
//!
//! Concrete implementations of the core crate's ports:
//! - SQLite persistence for linked identities and the response cache
//! - X (Twitter) API gateway for OAuth and engagement lookups
//! - Telegram Bot API gateway for membership checks

pub mod database;
pub mod http;
pub mod telegram;
pub mod twitter;

pub use database::{DbManager, SqliteCacheRepository, SqliteIdentityRepository};
pub use http::HttpClient;
pub use telegram::TelegramGateway;
pub use twitter::TwitterGateway;
