//! User module - accounts, roles and permissions.
//!
//! An account is created the first time a verified identity calls the API.
//! Its role decides what the caller may do; see [`permission`] for the table.

pub mod account;
pub mod errors;
pub mod permission;

pub use account::UserAccount;
pub use errors::UserError;
pub use permission::{check_permission, has_permission, permissions_for, Permission};
