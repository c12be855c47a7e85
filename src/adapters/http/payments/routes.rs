//! Axum routes for payment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    approve_payment, get_payment_instructions, list_my_payments, list_payment_requests,
    list_plans, reject_payment, submit_payment,
};
use crate::adapters::http::state::AppState;

/// User payment routes, mounted at `/payments`.
///
/// # Routes
/// - `GET /plans` - Plans and prices
/// - `GET /` - Own payment history
/// - `POST /` - Submit a payment request
/// - `GET /:id/instructions` - Transfer details
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/plans", get(list_plans))
        .route("/", get(list_my_payments).post(submit_payment))
        .route("/:id/instructions", get(get_payment_instructions))
}

/// Admin review routes, mounted at `/admin/payments`.
///
/// # Routes
/// - `GET /` - Review queue (`?status=pending&limit=&offset=`)
/// - `POST /:id/approve` - Approve
/// - `POST /:id/reject` - Reject
pub fn admin_payment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payment_requests))
        .route("/:id/approve", post(approve_payment))
        .route("/:id/reject", post(reject_payment))
}
