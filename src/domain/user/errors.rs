//! User account errors.
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | CannotModifySelf | 409 |
//! | AccountDisabled | 403 |
//! | Forbidden | 403 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{AuthError, DomainError, ErrorCode, UserId, ValidationError};

/// Errors raised by account and user administration operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    NotFound(UserId),

    /// Admins may not demote or deactivate their own account.
    CannotModifySelf { action: &'static str },

    AccountDisabled(UserId),

    Forbidden,

    ValidationFailed { field: String, message: String },

    Infrastructure(String),
}

impl UserError {
    pub fn not_found(id: UserId) -> Self {
        UserError::NotFound(id)
    }

    pub fn cannot_modify_self(action: &'static str) -> Self {
        UserError::CannotModifySelf { action }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        UserError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        UserError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            UserError::NotFound(_) => ErrorCode::UserNotFound,
            UserError::CannotModifySelf { .. } => ErrorCode::Conflict,
            UserError::AccountDisabled(_) | UserError::Forbidden => ErrorCode::Forbidden,
            UserError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            UserError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            UserError::NotFound(id) => format!("User not found: {}", id),
            UserError::CannotModifySelf { action } => {
                format!("Administrators cannot {} their own account", action)
            }
            UserError::AccountDisabled(id) => format!("Account {} is disabled", id),
            UserError::Forbidden => "Insufficient permissions".to_string(),
            UserError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            UserError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for UserError {}

impl From<DomainError> for UserError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => UserError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => UserError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for UserError {
    fn from(err: ValidationError) -> Self {
        UserError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<AuthError> for UserError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InsufficientPermissions => UserError::Forbidden,
            other => UserError::Infrastructure(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_by_category() {
        assert_eq!(UserError::not_found(UserId::new()).code(), ErrorCode::UserNotFound);
        assert_eq!(UserError::cannot_modify_self("demote").code(), ErrorCode::Conflict);
        assert_eq!(UserError::Forbidden.code(), ErrorCode::Forbidden);
        assert_eq!(UserError::infrastructure("db").code(), ErrorCode::DatabaseError);
    }

    #[test]
    fn cannot_modify_self_message_names_action() {
        assert_eq!(
            UserError::cannot_modify_self("deactivate").message(),
            "Administrators cannot deactivate their own account"
        );
    }

    #[test]
    fn insufficient_permissions_becomes_forbidden() {
        assert_eq!(UserError::from(AuthError::InsufficientPermissions), UserError::Forbidden);
    }

    #[test]
    fn domain_validation_error_keeps_field() {
        let err = UserError::from(DomainError::validation("email", "bad"));
        assert_eq!(err, UserError::validation("email", "bad"));
    }
}
