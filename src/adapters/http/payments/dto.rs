//! HTTP DTOs for payment endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::account::dto::SubscriptionResponse;
use crate::application::handlers::payment::{
    ApprovePaymentRequestResult, SubmitPaymentRequestResult,
};
use crate::domain::payment::{PaymentInstructions, PaymentRequest, PaymentStatus, Plan};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to submit a payment request.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitPaymentRequest {
    /// Plan code, `basic` or `premium`.
    pub plan: String,
    /// Free text shown to the reviewing admin, e.g. the sender's bank.
    #[serde(default)]
    pub note: Option<String>,
}

/// Request to reject a payment request.
#[derive(Debug, Clone, Deserialize)]
pub struct RejectPaymentRequest {
    pub reason: String,
}

/// Query string for the admin review queue.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPaymentsParams {
    pub status: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    pub code: Plan,
    pub name: &'static str,
    pub price_vnd: i64,
    pub duration_days: i64,
    pub daily_token_limit: u32,
}

impl From<Plan> for PlanResponse {
    fn from(plan: Plan) -> Self {
        Self {
            code: plan,
            name: plan.display_name(),
            price_vnd: plan.price_vnd(),
            duration_days: plan.duration_days(),
            daily_token_limit: plan.daily_token_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlansResponse {
    pub plans: Vec<PlanResponse>,
}

impl PlansResponse {
    pub fn all() -> Self {
        Self {
            plans: Plan::ALL.into_iter().map(PlanResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentResponse {
    pub id: String,
    pub user_id: String,
    pub plan: Plan,
    pub amount_vnd: i64,
    pub transfer_reference: String,
    pub status: PaymentStatus,
    pub note: Option<String>,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<String>,
    pub created_at: String,
}

impl From<&PaymentRequest> for PaymentResponse {
    fn from(request: &PaymentRequest) -> Self {
        Self {
            id: request.id.to_string(),
            user_id: request.user_id.to_string(),
            plan: request.plan,
            amount_vnd: request.amount_vnd,
            transfer_reference: request.transfer_reference.clone(),
            status: request.status,
            note: request.note.clone(),
            rejection_reason: request.rejection_reason.clone(),
            reviewed_by: request.reviewed_by.map(|id| id.to_string()),
            reviewed_at: request.reviewed_at.map(|ts| ts.to_string()),
            created_at: request.created_at.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentListResponse {
    pub payments: Vec<PaymentResponse>,
}

impl From<Vec<PaymentRequest>> for PaymentListResponse {
    fn from(requests: Vec<PaymentRequest>) -> Self {
        Self {
            payments: requests.iter().map(PaymentResponse::from).collect(),
        }
    }
}

/// Response for a newly submitted request.
#[derive(Debug, Clone, Serialize)]
pub struct SubmittedPaymentResponse {
    pub payment: PaymentResponse,
    pub instructions: PaymentInstructions,
}

impl From<SubmitPaymentRequestResult> for SubmittedPaymentResponse {
    fn from(result: SubmitPaymentRequestResult) -> Self {
        Self {
            payment: PaymentResponse::from(&result.request),
            instructions: result.instructions,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApprovedPaymentResponse {
    pub payment: PaymentResponse,
    pub subscription: SubscriptionResponse,
    /// The user's new daily token limit.
    pub daily_limit: u32,
}

impl From<ApprovePaymentRequestResult> for ApprovedPaymentResponse {
    fn from(result: ApprovePaymentRequestResult) -> Self {
        Self {
            payment: PaymentResponse::from(&result.request),
            subscription: SubscriptionResponse::from(&result.subscription),
            daily_limit: result.daily_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    #[test]
    fn plans_response_lists_every_plan_with_price() {
        let json = serde_json::to_value(PlansResponse::all()).unwrap();
        let plans = json["plans"].as_array().unwrap();
        assert_eq!(plans.len(), Plan::ALL.len());
        assert_eq!(plans[0]["code"], "basic");
        assert_eq!(plans[0]["price_vnd"], 99_000);
    }

    #[test]
    fn payment_response_from_pending_request() {
        let request = PaymentRequest::submit(UserId::new(), Plan::Premium, Some("MB".into())).unwrap();
        let response = PaymentResponse::from(&request);
        assert_eq!(response.status, PaymentStatus::Pending);
        assert_eq!(response.amount_vnd, 199_000);
        assert_eq!(response.reviewed_by, None);
        assert_eq!(response.transfer_reference, request.transfer_reference);
    }

    #[test]
    fn submit_request_note_is_optional() {
        let req: SubmitPaymentRequest = serde_json::from_str(r#"{"plan":"basic"}"#).unwrap();
        assert_eq!(req.plan, "basic");
        assert_eq!(req.note, None);
    }
}
