//! Payment request repository port.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::{DomainError, PaymentRequestId, UserId};
use crate::domain::payment::{PaymentRequest, PaymentStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentFilter {
    pub status: Option<PaymentStatus>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for PaymentFilter {
    fn default() -> Self {
        Self {
            status: None,
            limit: 50,
            offset: 0,
        }
    }
}

/// Request counts per status plus approved revenue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PaymentStats {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub approved_revenue_vnd: i64,
}

/// Persistence for payment requests.
///
/// # Contract
///
/// - At most one `pending` request per user. `save` fails with
///   `PendingPaymentExists` when a second one is inserted.
/// - Transfer references are unique. `save` fails with `Conflict` when the
///   reference is already taken.
/// - `update_reviewed` only writes if the stored row is still `pending`,
///   so two admins reviewing the same request cannot both succeed.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn save(&self, request: &PaymentRequest) -> Result<(), DomainError>;

    /// Persists a review outcome. Returns `false` if the stored request was
    /// no longer pending (or missing) and nothing was written.
    async fn update_reviewed(&self, request: &PaymentRequest) -> Result<bool, DomainError>;

    async fn find_by_id(&self, id: &PaymentRequestId)
        -> Result<Option<PaymentRequest>, DomainError>;

    async fn find_pending_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PaymentRequest>, DomainError>;

    /// Newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<PaymentRequest>, DomainError>;

    /// Oldest first, so the review queue is worked in order.
    async fn list(&self, filter: PaymentFilter) -> Result<Vec<PaymentRequest>, DomainError>;

    async fn stats(&self) -> Result<PaymentStats, DomainError>;
}
