//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations over the
//! repository and provider ports.

pub mod account;
pub mod admin;
mod metering;
pub mod payment;
pub mod tutor;

pub use metering::QuotaMeter;
