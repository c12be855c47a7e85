//! GetPaymentInstructionsHandler - transfer details for an existing request.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, PaymentRequestId};
use crate::domain::payment::{BankAccount, PaymentError, PaymentInstructions};
use crate::domain::user::Permission;
use crate::ports::PaymentRepository;

#[derive(Debug, Clone)]
pub struct GetPaymentInstructionsQuery {
    pub user: AuthenticatedUser,
    pub payment_id: PaymentRequestId,
}

/// Visible to the request owner and payment reviewers. Anyone else gets
/// `NotFound` so request ids reveal nothing.
pub struct GetPaymentInstructionsHandler {
    payments: Arc<dyn PaymentRepository>,
    bank: BankAccount,
}

impl GetPaymentInstructionsHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>, bank: BankAccount) -> Self {
        Self { payments, bank }
    }

    pub async fn handle(
        &self,
        query: GetPaymentInstructionsQuery,
    ) -> Result<PaymentInstructions, PaymentError> {
        let request = self
            .payments
            .find_by_id(&query.payment_id)
            .await?
            .filter(|r| {
                r.user_id == query.user.id || query.user.role.has_permission(Permission::ReviewPayments)
            })
            .ok_or(PaymentError::not_found(query.payment_id))?;

        Ok(self.bank.instructions_for(&request))
    }
}
