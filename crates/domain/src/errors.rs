//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Questlink
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum QuestlinkError {
    /// Callback carried an unknown, reused, or expired state token.
    ///
    /// Terminal for the login attempt; reported to the caller without
    /// internal detail.
    #[error("invalid authorization state")]
    InvalidState,

    /// Signed login payload failed verification (bad HMAC, missing hash,
    /// or stale timestamp).
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// A required precondition does not hold (e.g. reconciliation target
    /// user missing). Never auto-remediated.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// Request is missing required parameters or carries malformed values.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// Upstream provider answered with a non-success status.
    #[error("upstream error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    /// Transport-level failure talking to an upstream provider (includes
    /// timeouts).
    #[error("network error: {0}")]
    Network(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for Questlink operations
pub type Result<T> = std::result::Result<T, QuestlinkError>;

impl QuestlinkError {
    /// Stable label suitable for metrics and log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::InvalidState => "invalid_state",
            Self::InvalidSignature(_) => "invalid_signature",
            Self::Precondition(_) => "precondition",
            Self::MalformedRequest(_) => "malformed_request",
            Self::Upstream { .. } => "upstream",
            Self::Network(_) => "network",
            Self::Database(_) => "database",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::Internal(_) => "internal",
        }
    }
}
