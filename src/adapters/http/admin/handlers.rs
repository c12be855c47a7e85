//! HTTP handlers for admin endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::response::IntoResponse;

use crate::adapters::http::account::dto::{QuotaResponse, UserResponse};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::params::{page, parse_id, parse_optional};
use crate::adapters::http::state::AppState;
use crate::application::handlers::admin::{
    ChangeUserRoleCommand, GetAdminStatsQuery, ListUsersQuery, ResetQuotaCommand,
    SetQuotaLimitCommand, SetUserActiveCommand,
};
use crate::domain::foundation::{Role, UserId};
use crate::ports::UserFilter;

use super::dto::{
    ChangeRoleRequest, ListUsersParams, RoleChangeResponse, SetActiveRequest, SetQuotaRequest,
    UserListResponse,
};

/// GET /api/admin/users - Accounts, newest first
pub async fn list_users(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
    Query(params): Query<ListUsersParams>,
) -> Result<impl IntoResponse, ApiError> {
    let (limit, offset) = page(params.limit, params.offset);
    let filter = UserFilter {
        role: parse_optional(params.role.as_deref())?,
        limit,
        offset,
    };

    let accounts = state
        .list_users_handler()
        .handle(ListUsersQuery { actor, filter })
        .await?;

    Ok(Json(UserListResponse::from(accounts)))
}

/// PATCH /api/admin/users/:id/role
pub async fn change_user_role(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
    Path(id): Path<String>,
    Json(request): Json<ChangeRoleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id: UserId = parse_id("id", &id)?;
    let role: Role = request.role.parse()?;

    let result = state
        .change_user_role_handler()
        .handle(ChangeUserRoleCommand {
            actor,
            user_id,
            role,
        })
        .await?;

    Ok(Json(RoleChangeResponse::from(result)))
}

/// PATCH /api/admin/users/:id/active
pub async fn set_user_active(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
    Path(id): Path<String>,
    Json(request): Json<SetActiveRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id: UserId = parse_id("id", &id)?;

    let account = state
        .set_user_active_handler()
        .handle(SetUserActiveCommand {
            actor,
            user_id,
            active: request.active,
        })
        .await?;

    Ok(Json(UserResponse::from(&account)))
}

/// PUT /api/admin/users/:id/quota
pub async fn set_quota_limit(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
    Path(id): Path<String>,
    Json(request): Json<SetQuotaRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id: UserId = parse_id("id", &id)?;

    let snapshot = state
        .set_quota_limit_handler()
        .handle(SetQuotaLimitCommand {
            actor,
            user_id,
            daily_limit: request.daily_limit,
        })
        .await?;

    Ok(Json(QuotaResponse::from(snapshot)))
}

/// POST /api/admin/users/:id/quota/reset
pub async fn reset_quota(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id: UserId = parse_id("id", &id)?;

    let snapshot = state
        .reset_quota_handler()
        .handle(ResetQuotaCommand { actor, user_id })
        .await?;

    Ok(Json(QuotaResponse::from(snapshot)))
}

/// GET /api/admin/stats
pub async fn get_admin_stats(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state
        .admin_stats_handler()
        .handle(GetAdminStatsQuery { actor })
        .await?;

    Ok(Json(stats))
}
