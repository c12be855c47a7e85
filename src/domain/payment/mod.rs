//! Payment module - manual bank transfer purchases.
//!
//! Users transfer money to the company account with a reference code in the
//! memo, then wait for an admin to match the transfer and approve the
//! request. Approval starts or extends a [`Subscription`] and raises the
//! user's daily token limit to the plan's.

pub mod errors;
pub mod instructions;
pub mod plan;
pub mod request;
pub mod status;
pub mod subscription;

pub use errors::PaymentError;
pub use instructions::{BankAccount, PaymentInstructions, VIETQR_IMAGE_BASE};
pub use plan::Plan;
pub use request::{transfer_reference_for, PaymentRequest};
pub use status::PaymentStatus;
pub use subscription::{apply_purchase, Subscription};
