//! Axum routes for admin endpoints, mounted at `/admin`.

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use super::handlers::{
    change_user_role, get_admin_stats, list_users, reset_quota, set_quota_limit, set_user_active,
};
use crate::adapters::http::state::AppState;

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id/role", patch(change_user_role))
        .route("/users/:id/active", patch(set_user_active))
        .route("/users/:id/quota", put(set_quota_limit))
        .route("/users/:id/quota/reset", post(reset_quota))
        .route("/stats", get(get_admin_stats))
}
