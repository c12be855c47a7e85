//! SubmitPaymentRequestHandler - a user reports a bank transfer for a plan.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{AuthenticatedUser, ErrorCode};
use crate::domain::payment::{BankAccount, PaymentError, PaymentInstructions, PaymentRequest, Plan};
use crate::domain::user::{check_permission, Permission};
use crate::ports::PaymentRepository;

#[derive(Debug, Clone)]
pub struct SubmitPaymentRequestCommand {
    pub user: AuthenticatedUser,
    pub plan: Plan,
    pub note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SubmitPaymentRequestResult {
    pub request: PaymentRequest,
    pub instructions: PaymentInstructions,
}

/// Fresh ids tried before a reference collision is reported as an error.
const MAX_REFERENCE_ATTEMPTS: u32 = 3;

pub struct SubmitPaymentRequestHandler {
    payments: Arc<dyn PaymentRepository>,
    bank: BankAccount,
}

impl SubmitPaymentRequestHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>, bank: BankAccount) -> Self {
        Self { payments, bank }
    }

    pub async fn handle(
        &self,
        cmd: SubmitPaymentRequestCommand,
    ) -> Result<SubmitPaymentRequestResult, PaymentError> {
        check_permission(&cmd.user, Permission::SubmitPayment)?;

        if self
            .payments
            .find_pending_for_user(&cmd.user.id)
            .await?
            .is_some()
        {
            return Err(PaymentError::pending_exists(cmd.user.id));
        }

        let mut attempt = 1;
        let request = loop {
            let request = PaymentRequest::submit(cmd.user.id, cmd.plan, cmd.note.clone())?;
            match self.payments.save(&request).await {
                Ok(()) => break request,
                // The store enforces the one-pending rule too; this catches a
                // race between the check above and the insert.
                Err(e) if e.code == ErrorCode::PendingPaymentExists => {
                    return Err(PaymentError::pending_exists(cmd.user.id));
                }
                // The reference is derived from the id, so a new id gives a new one.
                Err(e) if e.code == ErrorCode::Conflict && attempt < MAX_REFERENCE_ATTEMPTS => {
                    warn!(
                        user_id = %cmd.user.id,
                        reference = %request.transfer_reference,
                        attempt,
                        "Transfer reference already taken, regenerating"
                    );
                    attempt += 1;
                }
                Err(e) => return Err(PaymentError::from(e)),
            }
        };

        info!(
            payment_id = %request.id,
            user_id = %request.user_id,
            plan = request.plan.code(),
            amount_vnd = request.amount_vnd,
            reference = %request.transfer_reference,
            "Payment request submitted"
        );

        let instructions = self.bank.instructions_for(&request);
        Ok(SubmitPaymentRequestResult {
            request,
            instructions,
        })
    }
}
