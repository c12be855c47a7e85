//! Quota module - per-user daily LLM token budget.

pub mod errors;
pub mod policy;
pub mod token_quota;

pub use errors::QuotaError;
pub use policy::{QuotaPolicy, DEFAULT_PARENT_DAILY_LIMIT, DEFAULT_TEACHER_DAILY_LIMIT};
pub use token_quota::{QuotaReservation, QuotaSnapshot, QuotaStatus, TokenQuota};
