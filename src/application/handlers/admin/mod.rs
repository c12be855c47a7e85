//! Admin handlers: user management, quota overrides and dashboard stats.

mod change_user_role;
mod get_admin_stats;
mod list_users;
mod reset_quota;
mod set_quota_limit;
mod set_user_active;

pub use change_user_role::{ChangeUserRoleCommand, ChangeUserRoleHandler, ChangeUserRoleResult};
pub use get_admin_stats::{AdminStats, GetAdminStatsHandler, GetAdminStatsQuery};
pub use list_users::{ListUsersHandler, ListUsersQuery};
pub use reset_quota::{ResetQuotaCommand, ResetQuotaHandler};
pub use set_quota_limit::{SetQuotaLimitCommand, SetQuotaLimitHandler, MAX_MANUAL_DAILY_LIMIT};
pub use set_user_active::{SetUserActiveCommand, SetUserActiveHandler};
