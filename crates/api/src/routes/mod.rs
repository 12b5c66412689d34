//! Route table

pub mod auth;
pub mod telegram;
pub mod twitter;

use axum::routing::{get, post};
use axum::Router;

use crate::context::AppContext;

pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/auth/start", get(auth::start))
        .route("/auth/callback", get(auth::callback))
        .route("/login/widget", post(telegram::widget_login))
        .route("/twitter/user", get(twitter::user))
        .route("/twitter/check-retweet", get(twitter::check_retweet))
        .route("/twitter/check-follow", get(twitter::check_follow))
        .route("/twitter/check-smart-follower", get(twitter::check_smart_follower))
        .with_state(ctx)
}

async fn health() -> &'static str {
    "ok"
}
