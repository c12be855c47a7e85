//! Errors for tutoring and content generation.

use crate::domain::foundation::{AuthError, DomainError, ErrorCode, ValidationError};
use crate::domain::quota::QuotaError;
use crate::ports::AIError;

#[derive(Debug, Clone, PartialEq)]
pub enum TutorError {
    Forbidden,

    ValidationFailed { field: String, message: String },

    QuotaExceeded { used: u32, limit: u32 },

    Ai(AIError),

    Infrastructure(String),
}

impl TutorError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        TutorError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        TutorError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            TutorError::Forbidden => ErrorCode::Forbidden,
            TutorError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            TutorError::QuotaExceeded { .. } => ErrorCode::QuotaExceeded,
            TutorError::Ai(AIError::RateLimited { .. }) => ErrorCode::RateLimited,
            TutorError::Ai(_) => ErrorCode::AIProviderError,
            TutorError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            TutorError::Forbidden => "Insufficient permissions".to_string(),
            TutorError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            TutorError::QuotaExceeded { used, limit } => format!(
                "Daily token quota exceeded ({} of {} tokens used). It resets at midnight.",
                used, limit
            ),
            TutorError::Ai(AIError::RateLimited { retry_after_secs }) => format!(
                "The AI service is busy, please retry in {} seconds",
                retry_after_secs
            ),
            TutorError::Ai(AIError::ContentFiltered { .. }) => {
                "The AI service declined to answer this request".to_string()
            }
            TutorError::Ai(_) => "The AI service is temporarily unavailable".to_string(),
            TutorError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for TutorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for TutorError {}

impl From<DomainError> for TutorError {
    fn from(err: DomainError) -> Self {
        TutorError::Infrastructure(err.to_string())
    }
}

impl From<ValidationError> for TutorError {
    fn from(err: ValidationError) -> Self {
        TutorError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<AuthError> for TutorError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InsufficientPermissions => TutorError::Forbidden,
            other => TutorError::Infrastructure(other.to_string()),
        }
    }
}

impl From<QuotaError> for TutorError {
    fn from(err: QuotaError) -> Self {
        match err {
            QuotaError::Exceeded { used, limit } => TutorError::QuotaExceeded { used, limit },
            QuotaError::Forbidden => TutorError::Forbidden,
            QuotaError::ValidationFailed { field, message } => {
                TutorError::ValidationFailed { field, message }
            }
            other => TutorError::Infrastructure(other.message()),
        }
    }
}

impl From<AIError> for TutorError {
    fn from(err: AIError) -> Self {
        TutorError::Ai(err)
    }
}
