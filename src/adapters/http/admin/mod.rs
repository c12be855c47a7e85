//! HTTP adapter for user administration.
//!
//! - `GET /api/admin/users?role=` - List accounts
//! - `PATCH /api/admin/users/:id/role` - Change a role
//! - `PATCH /api/admin/users/:id/active` - Enable or disable an account
//! - `PUT /api/admin/users/:id/quota` - Override the daily token limit
//! - `POST /api/admin/users/:id/quota/reset` - Zero today's usage
//! - `GET /api/admin/stats` - Dashboard counters

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::admin_routes;
