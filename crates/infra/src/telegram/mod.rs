//! Telegram Bot API integration

pub mod gateway;

pub use gateway::TelegramGateway;
