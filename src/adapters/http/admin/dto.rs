//! HTTP DTOs for admin endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::account::dto::UserResponse;
use crate::application::handlers::admin::ChangeUserRoleResult;
use crate::domain::user::UserAccount;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct ChangeRoleRequest {
    /// `admin`, `teacher` or `parent`.
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetActiveRequest {
    pub active: bool,
}

/// Manual daily limit override. `null` removes the limit.
#[derive(Debug, Clone, Deserialize)]
pub struct SetQuotaRequest {
    pub daily_limit: Option<u32>,
}

/// Query string for the user listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersParams {
    pub role: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
}

impl From<Vec<UserAccount>> for UserListResponse {
    fn from(accounts: Vec<UserAccount>) -> Self {
        Self {
            users: accounts.iter().map(UserResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleChangeResponse {
    pub user: UserResponse,
    /// False when the user already had the requested role.
    pub changed: bool,
}

impl From<ChangeUserRoleResult> for RoleChangeResponse {
    fn from(result: ChangeUserRoleResult) -> Self {
        Self {
            user: UserResponse::from(&result.account),
            changed: result.changed,
        }
    }
}
