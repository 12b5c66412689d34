//! X (Twitter) API integration

pub mod gateway;

pub use gateway::TwitterGateway;
