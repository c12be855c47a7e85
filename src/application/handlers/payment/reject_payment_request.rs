//! RejectPaymentRequestHandler - declines a transfer claim with a reason.

use std::sync::Arc;

use tracing::info;

use super::review;
use crate::domain::foundation::{AuthenticatedUser, PaymentRequestId};
use crate::domain::payment::{PaymentError, PaymentRequest};
use crate::domain::user::{check_permission, Permission};
use crate::ports::PaymentRepository;

#[derive(Debug, Clone)]
pub struct RejectPaymentRequestCommand {
    pub admin: AuthenticatedUser,
    pub payment_id: PaymentRequestId,
    pub reason: String,
}

pub struct RejectPaymentRequestHandler {
    payments: Arc<dyn PaymentRepository>,
}

impl RejectPaymentRequestHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>) -> Self {
        Self { payments }
    }

    pub async fn handle(
        &self,
        cmd: RejectPaymentRequestCommand,
    ) -> Result<PaymentRequest, PaymentError> {
        check_permission(&cmd.admin, Permission::ReviewPayments)?;

        let mut request = review::load(self.payments.as_ref(), cmd.payment_id).await?;
        request.reject(cmd.admin.id, cmd.reason)?;
        review::persist(self.payments.as_ref(), &request, "reject").await?;

        info!(
            payment_id = %request.id,
            user_id = %request.user_id,
            admin_id = %cmd.admin.id,
            reason = request.rejection_reason.as_deref().unwrap_or_default(),
            "Payment request rejected"
        );

        Ok(request)
    }
}
