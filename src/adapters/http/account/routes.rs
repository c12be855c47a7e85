//! Axum routes for account endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_me, get_my_quota};
use crate::adapters::http::state::AppState;

/// # Routes
/// - `GET /me` - Current account
/// - `GET /me/quota` - Today's token usage
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        .route("/me/quota", get(get_my_quota))
}
