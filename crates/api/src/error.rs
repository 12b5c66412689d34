//! HTTP error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use questlink_domain::QuestlinkError;
use serde_json::json;
use tracing::{error, warn};

/// Wrapper turning domain errors into JSON HTTP responses.
///
/// Server-side detail (database, upstream bodies, config) never reaches
/// the client; it is logged here and replaced with a generic message.
pub struct ApiError(pub QuestlinkError);

impl From<QuestlinkError> for ApiError {
    fn from(err: QuestlinkError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            QuestlinkError::InvalidState => {
                (StatusCode::BAD_REQUEST, "invalid authorization state".to_string())
            }
            QuestlinkError::InvalidSignature(msg) | QuestlinkError::MalformedRequest(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            QuestlinkError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            QuestlinkError::Precondition(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "precondition failed".to_string())
            }
            QuestlinkError::Upstream { .. } => {
                (StatusCode::BAD_GATEWAY, "upstream provider error".to_string())
            }
            QuestlinkError::Network(_) => {
                (StatusCode::BAD_GATEWAY, "upstream provider unreachable".to_string())
            }
            QuestlinkError::Database(_)
            | QuestlinkError::Config(_)
            | QuestlinkError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };

        if status.is_server_error() {
            error!(code = self.0.label(), detail = %self.0, "request failed");
        } else {
            warn!(code = self.0.label(), %status, "request rejected");
        }

        (status, Json(json!({ "error": message, "code": self.0.label() }))).into_response()
    }
}
