//! HTTP adapter for the caller's own account.
//!
//! - `GET /api/me` - Profile, role, permissions and active plan
//! - `GET /api/me/quota` - Today's token usage and remaining budget

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::account_routes;
