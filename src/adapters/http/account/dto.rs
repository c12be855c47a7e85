//! HTTP DTOs for account endpoints.

use serde::Serialize;

use crate::application::handlers::account::GetProfileResult;
use crate::domain::foundation::Role;
use crate::domain::payment::{Plan, Subscription};
use crate::domain::quota::QuotaSnapshot;
use crate::domain::user::{Permission, UserAccount};

/// Account view shared by `/me` and the admin user listing.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Role,
    /// Vietnamese label for the role.
    pub role_name: &'static str,
    pub is_active: bool,
    /// ISO 8601.
    pub created_at: String,
    pub updated_at: String,
}

impl From<&UserAccount> for UserResponse {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: account.id.to_string(),
            email: account.email.clone(),
            full_name: account.full_name.clone(),
            role: account.role,
            role_name: account.role.display_name(),
            is_active: account.is_active,
            created_at: account.created_at.to_string(),
            updated_at: account.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionResponse {
    pub plan: Plan,
    pub plan_name: &'static str,
    pub daily_token_limit: u32,
    pub started_at: String,
    pub expires_at: String,
}

impl From<&Subscription> for SubscriptionResponse {
    fn from(sub: &Subscription) -> Self {
        Self {
            plan: sub.plan,
            plan_name: sub.plan.display_name(),
            daily_token_limit: sub.plan.daily_token_limit(),
            started_at: sub.started_at.to_string(),
            expires_at: sub.expires_at.to_string(),
        }
    }
}

/// Response for `GET /api/me`.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub permissions: Vec<Permission>,
    /// Active plan, or null.
    pub subscription: Option<SubscriptionResponse>,
}

impl From<GetProfileResult> for ProfileResponse {
    fn from(result: GetProfileResult) -> Self {
        Self {
            user: UserResponse::from(&result.account),
            permissions: result.permissions.to_vec(),
            subscription: result.subscription.as_ref().map(SubscriptionResponse::from),
        }
    }
}

/// Quota view; `null` limit and remaining mean unlimited.
#[derive(Debug, Clone, Serialize)]
pub struct QuotaResponse {
    pub daily_limit: Option<u32>,
    pub used_today: u32,
    pub remaining: Option<u32>,
    /// Service day the usage belongs to (YYYY-MM-DD, Vietnam time).
    pub date: String,
}

impl From<QuotaSnapshot> for QuotaResponse {
    fn from(snapshot: QuotaSnapshot) -> Self {
        Self {
            daily_limit: snapshot.daily_limit,
            used_today: snapshot.used_today,
            remaining: snapshot.remaining,
            date: snapshot.service_date.format("%Y-%m-%d").to_string(),
        }
    }
}
