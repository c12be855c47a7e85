//! Shared steps for approving and rejecting payment requests.

use crate::domain::foundation::PaymentRequestId;
use crate::domain::payment::{PaymentError, PaymentRequest};
use crate::ports::PaymentRepository;

pub(super) async fn load(
    payments: &dyn PaymentRepository,
    id: PaymentRequestId,
) -> Result<PaymentRequest, PaymentError> {
    payments
        .find_by_id(&id)
        .await?
        .ok_or(PaymentError::not_found(id))
}

/// Writes a reviewed request, failing if another admin decided it first.
pub(super) async fn persist(
    payments: &dyn PaymentRepository,
    reviewed: &PaymentRequest,
    action: &str,
) -> Result<(), PaymentError> {
    if payments.update_reviewed(reviewed).await? {
        return Ok(());
    }

    let current = payments
        .find_by_id(&reviewed.id)
        .await?
        .map(|r| r.status.as_str())
        .unwrap_or("reviewed");
    Err(PaymentError::invalid_state(current, action))
}
