//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresUserRepository` - accounts and their roles
//! - `PostgresQuotaRepository` - daily token quotas with atomic charging
//! - `PostgresPaymentRepository` - bank-transfer payment requests
//! - `PostgresSubscriptionRepository` - active plan periods

mod payment_repository;
mod quota_repository;
mod subscription_repository;
mod user_repository;

pub use payment_repository::PostgresPaymentRepository;
pub use quota_repository::PostgresQuotaRepository;
pub use subscription_repository::PostgresSubscriptionRepository;
pub use user_repository::PostgresUserRepository;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use chrono::{DateTime, Utc};

fn timestamp(dt: DateTime<Utc>) -> Timestamp {
    Timestamp::from_datetime(dt)
}

/// Converts a stored BIGINT token count back into the domain's `u32`.
fn token_count(value: i64, column: &str) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid {} value: {}", column, value),
        )
    })
}

fn decode_error(column: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Invalid {} value: {}", column, err),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_count_accepts_u32_range() {
        assert_eq!(token_count(0, "used_today").unwrap(), 0);
        assert_eq!(token_count(i64::from(u32::MAX), "used_today").unwrap(), u32::MAX);
    }

    #[test]
    fn token_count_rejects_negative_and_overflow() {
        assert!(token_count(-1, "used_today").is_err());
        assert!(token_count(i64::from(u32::MAX) + 1, "daily_limit").is_err());
    }
}
