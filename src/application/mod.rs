//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (write) and queries (read) each get their own handler type.

pub mod handlers;

pub use handlers::QuotaMeter;
