//! HTTP adapter for manual bank transfer payments.
//!
//! User endpoints:
//! - `GET /api/payments/plans` - Plans and prices
//! - `POST /api/payments` - Submit a payment request
//! - `GET /api/payments` - Own payment history
//! - `GET /api/payments/:id/instructions` - Transfer details and VietQR link
//!
//! Admin endpoints:
//! - `GET /api/admin/payments?status=` - Review queue
//! - `POST /api/admin/payments/:id/approve` - Approve a transfer
//! - `POST /api/admin/payments/:id/reject` - Reject a transfer

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{admin_payment_routes, payment_routes};
