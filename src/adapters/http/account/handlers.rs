//! HTTP handlers for account endpoints.

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::account::{GetMyQuotaQuery, GetProfileQuery};

use super::dto::{ProfileResponse, QuotaResponse};

/// GET /api/me - Current account with permissions and active plan
pub async fn get_me(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .get_profile_handler()
        .handle(GetProfileQuery { user })
        .await?;

    Ok(Json(ProfileResponse::from(result)))
}

/// GET /api/me/quota - Today's token usage
pub async fn get_my_quota(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state
        .get_my_quota_handler()
        .handle(GetMyQuotaQuery { user })
        .await?;

    Ok(Json(QuotaResponse::from(snapshot)))
}
