//! Quota repository port.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::quota::{QuotaReservation, TokenQuota};

/// Persistence for daily token quotas.
///
/// # Contract
///
/// `try_reserve`, `settle` and `charge` must be atomic per row: the day
/// rollover, the admission check and the increment happen under one row
/// lock so that concurrent requests from the same user never lose an
/// update, reset the counter twice, or get admitted against the same
/// remaining budget.
#[async_trait]
pub trait QuotaRepository: Send + Sync {
    async fn find(&self, user_id: &UserId) -> Result<Option<TokenQuota>, DomainError>;

    /// Insert or replace the quota row.
    async fn save(&self, quota: &TokenQuota) -> Result<(), DomainError>;

    /// Inserts `quota` unless the user already has a row, and returns the
    /// stored row either way. An existing row is never overwritten.
    async fn insert_if_absent(&self, quota: &TokenQuota) -> Result<TokenQuota, DomainError>;

    /// Applies [`TokenQuota::reserve`] to the stored row.
    ///
    /// Returns `None` when the row is missing or the call is not admitted;
    /// the row is untouched in both cases.
    async fn try_reserve(
        &self,
        user_id: &UserId,
        needed: u32,
        budget: u32,
        today: NaiveDate,
    ) -> Result<Option<QuotaReservation>, DomainError>;

    /// Applies [`TokenQuota::settle`] to the stored row. Returns `None` if missing.
    async fn settle(
        &self,
        reservation: &QuotaReservation,
        spent: u32,
        today: NaiveDate,
    ) -> Result<Option<TokenQuota>, DomainError>;

    /// Adds `tokens` to today's usage, zeroing it first if `last_reset_date`
    /// is before `today`. Returns the updated row, `None` if missing.
    async fn charge(
        &self,
        user_id: &UserId,
        tokens: u32,
        today: NaiveDate,
    ) -> Result<Option<TokenQuota>, DomainError>;

    /// Clears today's usage. Returns `None` if missing.
    async fn reset(&self, user_id: &UserId, today: NaiveDate)
        -> Result<Option<TokenQuota>, DomainError>;

    /// Changes the daily limit (`None` = unlimited). Returns `None` if missing.
    async fn set_limit(
        &self,
        user_id: &UserId,
        daily_limit: Option<u32>,
    ) -> Result<Option<TokenQuota>, DomainError>;

    async fn list(&self, limit: u32, offset: u32) -> Result<Vec<TokenQuota>, DomainError>;
}
