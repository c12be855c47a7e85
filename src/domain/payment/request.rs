//! PaymentRequest aggregate.

use serde::Serialize;

use super::{PaymentError, PaymentStatus, Plan};
use crate::domain::foundation::{PaymentRequestId, StateMachine, Timestamp, UserId};

const MAX_NOTE_LEN: usize = 500;
const MAX_REASON_LEN: usize = 500;
const REFERENCE_PREFIX: &str = "GS";

/// A user's claim to have transferred the price of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentRequest {
    pub id: PaymentRequestId,
    pub user_id: UserId,
    pub plan: Plan,
    pub amount_vnd: i64,
    /// Code the user puts in the bank transfer memo so admins can match it.
    pub transfer_reference: String,
    pub status: PaymentStatus,
    pub note: Option<String>,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<UserId>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PaymentRequest {
    /// Opens a pending request for `plan` at the plan's price.
    pub fn submit(user_id: UserId, plan: Plan, note: Option<String>) -> Result<Self, PaymentError> {
        let note = note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        if let Some(ref n) = note {
            if n.chars().count() > MAX_NOTE_LEN {
                return Err(PaymentError::validation(
                    "note",
                    format!("must be at most {} characters", MAX_NOTE_LEN),
                ));
            }
        }

        let id = PaymentRequestId::new();
        let now = Timestamp::now();
        Ok(Self {
            id,
            user_id,
            plan,
            amount_vnd: plan.price_vnd(),
            transfer_reference: transfer_reference_for(&id),
            status: PaymentStatus::Pending,
            note,
            rejection_reason: None,
            reviewed_by: None,
            reviewed_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_pending(&self) -> bool {
        self.status == PaymentStatus::Pending
    }

    /// Marks the transfer as received.
    pub fn approve(&mut self, admin: UserId) -> Result<(), PaymentError> {
        self.review(PaymentStatus::Approved, admin, "approve")
    }

    /// Marks the claim as invalid. A reason is required so the user can
    /// see what went wrong.
    pub fn reject(&mut self, admin: UserId, reason: impl Into<String>) -> Result<(), PaymentError> {
        let reason = reason.into().trim().to_string();
        if reason.is_empty() {
            return Err(PaymentError::validation("reason", "cannot be empty"));
        }
        if reason.chars().count() > MAX_REASON_LEN {
            return Err(PaymentError::validation(
                "reason",
                format!("must be at most {} characters", MAX_REASON_LEN),
            ));
        }
        self.review(PaymentStatus::Rejected, admin, "reject")?;
        self.rejection_reason = Some(reason);
        Ok(())
    }

    fn review(
        &mut self,
        target: PaymentStatus,
        admin: UserId,
        action: &str,
    ) -> Result<(), PaymentError> {
        let current = self.status;
        self.status = current
            .transition_to(target)
            .map_err(|_| PaymentError::invalid_state(current.as_str(), action))?;
        let now = Timestamp::now();
        self.reviewed_by = Some(admin);
        self.reviewed_at = Some(now);
        self.updated_at = now;
        Ok(())
    }
}

/// `GS` followed by the first 8 hex digits of the id, upper-case.
pub fn transfer_reference_for(id: &PaymentRequestId) -> String {
    let hex = id.as_uuid().simple().to_string();
    format!("{}{}", REFERENCE_PREFIX, hex[..8].to_uppercase())
}
