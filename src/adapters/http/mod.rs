//! HTTP adapters - REST API implementations.
//!
//! Each area has its own dto / handlers / routes module; `router` wires them
//! under `/api` behind the auth middleware.

pub mod account;
pub mod admin;
pub mod error;
pub mod middleware;
pub mod params;
pub mod payments;
pub mod router;
pub mod state;
pub mod tutor;

pub use error::{ApiError, ErrorResponse};
pub use router::{build_router, RouterConfig};
pub use state::AppState;
