//! Quota errors.

use crate::domain::foundation::{AuthError, DomainError, ErrorCode, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotaError {
    /// Daily limit reached; maps to HTTP 429.
    Exceeded { used: u32, limit: u32 },

    NotFound(UserId),

    Forbidden,

    ValidationFailed { field: String, message: String },

    Infrastructure(String),
}

impl QuotaError {
    pub fn exceeded(used: u32, limit: u32) -> Self {
        QuotaError::Exceeded { used, limit }
    }

    pub fn not_found(user_id: UserId) -> Self {
        QuotaError::NotFound(user_id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        QuotaError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        QuotaError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            QuotaError::Exceeded { .. } => ErrorCode::QuotaExceeded,
            QuotaError::NotFound(_) => ErrorCode::QuotaNotFound,
            QuotaError::Forbidden => ErrorCode::Forbidden,
            QuotaError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            QuotaError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            QuotaError::Exceeded { used, limit } => format!(
                "Daily token quota exceeded ({} of {} tokens used). It resets at midnight.",
                used, limit
            ),
            QuotaError::NotFound(user_id) => format!("No quota found for user: {}", user_id),
            QuotaError::Forbidden => "Insufficient permissions".to_string(),
            QuotaError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            QuotaError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for QuotaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for QuotaError {}

impl From<DomainError> for QuotaError {
    fn from(err: DomainError) -> Self {
        QuotaError::Infrastructure(err.to_string())
    }
}

impl From<AuthError> for QuotaError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InsufficientPermissions => QuotaError::Forbidden,
            other => QuotaError::Infrastructure(other.to_string()),
        }
    }
}
