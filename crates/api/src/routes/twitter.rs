//! Engagement check endpoints
//!
//! All check endpoints sit behind the response cache; the user lookup
//! goes straight upstream.

use axum::extract::{Query, State};
use axum::Json;
use questlink_core::verification::service::{FollowCheck, RetweetCheck, SmartFollowerCheck};
use questlink_domain::constants::DEFAULT_MIN_FOLLOWERS;
use questlink_domain::types::twitter::TwitterUser;
use questlink_domain::QuestlinkError;
use serde::Deserialize;

use crate::context::AppContext;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct UserParams {
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RetweetParams {
    tweet_id: Option<String>,
    user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FollowParams {
    target_user_id: Option<String>,
    user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SmartFollowerParams {
    user_id: Option<String>,
    min_followers: Option<u64>,
}

/// `GET /twitter/user?username=`
pub async fn user(
    State(ctx): State<AppContext>,
    Query(params): Query<UserParams>,
) -> Result<Json<TwitterUser>, ApiError> {
    let username = require(params.username, "username")?;
    Ok(Json(ctx.verification.user_by_username(&username).await?))
}

/// `GET /twitter/check-retweet?tweet_id=&user_id=`
pub async fn check_retweet(
    State(ctx): State<AppContext>,
    Query(params): Query<RetweetParams>,
) -> Result<Json<RetweetCheck>, ApiError> {
    let tweet_id = require(params.tweet_id, "tweet_id")?;
    let user_id = require(params.user_id, "user_id")?;
    Ok(Json(ctx.verification.check_retweet(&tweet_id, &user_id).await?))
}

/// `GET /twitter/check-follow?target_user_id=&user_id=`
pub async fn check_follow(
    State(ctx): State<AppContext>,
    Query(params): Query<FollowParams>,
) -> Result<Json<FollowCheck>, ApiError> {
    let target_user_id = require(params.target_user_id, "target_user_id")?;
    let user_id = require(params.user_id, "user_id")?;
    Ok(Json(ctx.verification.check_follow(&target_user_id, &user_id).await?))
}

/// `GET /twitter/check-smart-follower?user_id=&min_followers=`
pub async fn check_smart_follower(
    State(ctx): State<AppContext>,
    Query(params): Query<SmartFollowerParams>,
) -> Result<Json<SmartFollowerCheck>, ApiError> {
    let user_id = require(params.user_id, "user_id")?;
    let min_followers = params.min_followers.unwrap_or(DEFAULT_MIN_FOLLOWERS);
    Ok(Json(ctx.verification.check_smart_follower(&user_id, min_followers).await?))
}

fn require(value: Option<String>, name: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| QuestlinkError::MalformedRequest(format!("missing {name}")).into())
}
