//! Domain layer - business logic with no infrastructure dependencies.

pub mod foundation;
pub mod payment;
pub mod quota;
pub mod tutoring;
pub mod user;
