//! Payment workflow errors.
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | PendingExists | 409 |
//! | InvalidState | 409 |
//! | Forbidden | 403 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{
    AuthError, DomainError, ErrorCode, PaymentRequestId, UserId, ValidationError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    NotFound(PaymentRequestId),

    /// The user already has a request waiting for review.
    PendingExists(UserId),

    /// The request was already reviewed.
    InvalidState { current: String, attempted: String },

    Forbidden,

    ValidationFailed { field: String, message: String },

    Infrastructure(String),
}

impl PaymentError {
    pub fn not_found(id: PaymentRequestId) -> Self {
        PaymentError::NotFound(id)
    }

    pub fn pending_exists(user_id: UserId) -> Self {
        PaymentError::PendingExists(user_id)
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        PaymentError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        PaymentError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PaymentError::NotFound(_) => ErrorCode::PaymentRequestNotFound,
            PaymentError::PendingExists(_) => ErrorCode::PendingPaymentExists,
            PaymentError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            PaymentError::Forbidden => ErrorCode::Forbidden,
            PaymentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            PaymentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            PaymentError::NotFound(id) => format!("Payment request not found: {}", id),
            PaymentError::PendingExists(_) => {
                "You already have a payment request waiting for review".to_string()
            }
            PaymentError::InvalidState { current, attempted } => {
                format!("Cannot {} a payment request that is {}", attempted, current)
            }
            PaymentError::Forbidden => "Insufficient permissions".to_string(),
            PaymentError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            PaymentError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PaymentError {}

impl From<DomainError> for PaymentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => PaymentError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::InvalidStateTransition => PaymentError::InvalidState {
                current: "reviewed".to_string(),
                attempted: "review".to_string(),
            },
            _ => PaymentError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for PaymentError {
    fn from(err: ValidationError) -> Self {
        PaymentError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<AuthError> for PaymentError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InsufficientPermissions => PaymentError::Forbidden,
            other => PaymentError::Infrastructure(other.to_string()),
        }
    }
}
