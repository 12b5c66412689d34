//! Telegram widget login endpoint

use axum::extract::{Query, State};
use axum::Json;
use questlink_domain::types::telegram::{LoginPayload, WidgetLoginOutcome};
use questlink_domain::QuestlinkError;
use serde::Deserialize;

use crate::context::AppContext;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct WidgetParams {
    // The internal user id rides the query string: it cannot be part of
    // the signed widget payload, which only Telegram's servers produce.
    user_id: Option<String>,
}

/// `POST /login/widget?user_id=`: verify a widget payload, link the
/// Telegram identity, and report channel membership.
pub async fn widget_login(
    State(ctx): State<AppContext>,
    Query(params): Query<WidgetParams>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<WidgetLoginOutcome>, ApiError> {
    let user_id = params
        .user_id
        .filter(|v| !v.is_empty())
        .ok_or_else(|| QuestlinkError::MalformedRequest("missing user_id".into()))?;

    let outcome = ctx.telegram_login.login(&user_id, payload).await?;
    Ok(Json(outcome))
}
