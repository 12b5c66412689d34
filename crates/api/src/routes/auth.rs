//! OAuth login endpoints

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use questlink_domain::QuestlinkError;
use serde::Deserialize;
use tracing::warn;

use crate::context::AppContext;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct StartParams {
    user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    state: Option<String>,
    code: Option<String>,
}

/// `GET /auth/start?user_id=`: 302 to the provider authorization URL.
pub async fn start(
    State(ctx): State<AppContext>,
    Query(params): Query<StartParams>,
) -> Result<Response, ApiError> {
    let user_id = require(params.user_id, "user_id")?;
    let url = ctx.oauth.start_login(&user_id).await?;
    Ok(found(&url))
}

/// `GET /auth/callback?state=&code=`: complete the login.
///
/// Success and login failure both land back on the frontend dashboard;
/// only a structurally broken request gets a JSON error. Token material
/// never appears in the redirect.
pub async fn callback(
    State(ctx): State<AppContext>,
    Query(params): Query<CallbackParams>,
) -> Result<Response, ApiError> {
    let state = require(params.state, "state")?;
    let code = require(params.code, "code")?;

    match ctx.oauth.handle_callback(&state, &code).await {
        Ok(identity) => Ok(found(&format!(
            "{}/dashboard?username={}&id={}",
            ctx.frontend_url,
            urlencoding::encode(&identity.username),
            urlencoding::encode(&identity.provider_user_id),
        ))),
        Err(
            err @ (QuestlinkError::InvalidState
            | QuestlinkError::Upstream { .. }
            | QuestlinkError::Network(_)),
        ) => {
            warn!(code = err.label(), "login callback failed, redirecting to error page");
            Ok(found(&format!("{}/dashboard?status=error", ctx.frontend_url)))
        }
        Err(err) => Err(err.into()),
    }
}

fn require(value: Option<String>, name: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| QuestlinkError::MalformedRequest(format!("missing {name}")).into())
}

fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
