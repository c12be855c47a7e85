//! HTTP handlers for payment endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::params::{page, parse_id, parse_optional};
use crate::adapters::http::state::AppState;
use crate::application::handlers::payment::{
    ApprovePaymentRequestCommand, GetPaymentInstructionsQuery, ListMyPaymentsQuery,
    ListPaymentRequestsQuery, RejectPaymentRequestCommand, SubmitPaymentRequestCommand,
};
use crate::domain::foundation::PaymentRequestId;
use crate::domain::payment::Plan;
use crate::ports::PaymentFilter;

use super::dto::{
    ApprovedPaymentResponse, ListPaymentsParams, PaymentListResponse, PaymentResponse,
    PlansResponse, RejectPaymentRequest, SubmitPaymentRequest, SubmittedPaymentResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// User endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/payments/plans - Plans available for purchase
pub async fn list_plans(RequireAuth(_user): RequireAuth) -> impl IntoResponse {
    Json(PlansResponse::all())
}

/// POST /api/payments - Submit a bank transfer claim
pub async fn submit_payment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<SubmitPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let plan: Plan = request.plan.parse()?;
    let cmd = SubmitPaymentRequestCommand {
        user,
        plan,
        note: request.note,
    };

    let result = state.submit_payment_handler().handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(SubmittedPaymentResponse::from(result))))
}

/// GET /api/payments - Caller's payment history, newest first
pub async fn list_my_payments(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let requests = state
        .list_my_payments_handler()
        .handle(ListMyPaymentsQuery { user })
        .await?;

    Ok(Json(PaymentListResponse::from(requests)))
}

/// GET /api/payments/:id/instructions - Transfer details for a request
pub async fn get_payment_instructions(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let payment_id: PaymentRequestId = parse_id("id", &id)?;

    let instructions = state
        .payment_instructions_handler()
        .handle(GetPaymentInstructionsQuery { user, payment_id })
        .await?;

    Ok(Json(instructions))
}

// ════════════════════════════════════════════════════════════════════════════════
// Admin endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/payments - Review queue, oldest first
pub async fn list_payment_requests(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListPaymentsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let (limit, offset) = page(params.limit, params.offset);
    let filter = PaymentFilter {
        status: parse_optional(params.status.as_deref())?,
        limit,
        offset,
    };

    let requests = state
        .list_payment_requests_handler()
        .handle(ListPaymentRequestsQuery { user, filter })
        .await?;

    Ok(Json(PaymentListResponse::from(requests)))
}

/// POST /api/admin/payments/:id/approve - Approve and activate the plan
pub async fn approve_payment(
    State(state): State<AppState>,
    RequireAuth(admin): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let payment_id: PaymentRequestId = parse_id("id", &id)?;

    let result = state
        .approve_payment_handler()
        .handle(ApprovePaymentRequestCommand { admin, payment_id })
        .await?;

    Ok(Json(ApprovedPaymentResponse::from(result)))
}

/// POST /api/admin/payments/:id/reject - Reject with a reason
pub async fn reject_payment(
    State(state): State<AppState>,
    RequireAuth(admin): RequireAuth,
    Path(id): Path<String>,
    Json(request): Json<RejectPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let payment_id: PaymentRequestId = parse_id("id", &id)?;

    let rejected = state
        .reject_payment_handler()
        .handle(RejectPaymentRequestCommand {
            admin,
            payment_id,
            reason: request.reason,
        })
        .await?;

    Ok(Json(PaymentResponse::from(&rejected)))
}
