//! Payment handlers for the manual bank transfer workflow.
//!
//! ## Commands
//! - Submitting a payment request (user)
//! - Approving or rejecting a request (admin)
//!
//! ## Queries
//! - Own payment history
//! - Transfer instructions for a request
//! - Review queue (admin)

mod approve_payment_request;
mod get_payment_instructions;
mod list_my_payments;
mod list_payment_requests;
mod reject_payment_request;
mod review;
mod submit_payment_request;

// Commands
pub use approve_payment_request::{
    ApprovePaymentRequestCommand, ApprovePaymentRequestHandler, ApprovePaymentRequestResult,
};
pub use reject_payment_request::{RejectPaymentRequestCommand, RejectPaymentRequestHandler};
pub use submit_payment_request::{
    SubmitPaymentRequestCommand, SubmitPaymentRequestHandler, SubmitPaymentRequestResult,
};

// Queries
pub use get_payment_instructions::{GetPaymentInstructionsHandler, GetPaymentInstructionsQuery};
pub use list_my_payments::{ListMyPaymentsHandler, ListMyPaymentsQuery};
pub use list_payment_requests::{ListPaymentRequestsHandler, ListPaymentRequestsQuery};
