//! Account handlers: identity resolution, profile and own quota.

mod get_my_quota;
mod get_profile;
mod resolve_current_user;

pub use get_my_quota::{GetMyQuotaHandler, GetMyQuotaQuery};
pub use get_profile::{GetProfileHandler, GetProfileQuery, GetProfileResult};
pub use resolve_current_user::{
    ResolveCurrentUserCommand, ResolveCurrentUserHandler, ResolveCurrentUserResult,
};
