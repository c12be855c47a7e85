//! Authentication types for the domain layer.
//!
//! `AuthenticatedUser` is what request handlers see after the bearer token
//! has been verified *and* the account row has been loaded. The role comes
//! from that row; nothing the client sends can influence it.

use super::{Role, UserId};
use thiserror::Error;

/// A verified caller with their current role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Account identifier (same as the identity provider subject).
    pub id: UserId,

    /// Email used at sign-up.
    pub email: String,

    /// Role loaded from the users table.
    pub role: Role,

    /// Full name if the user filled in their profile.
    pub full_name: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, email: impl Into<String>, role: Role, full_name: Option<String>) -> Self {
        Self {
            id,
            email: email.into(),
            role,
            full_name,
        }
    }

    /// Returns the user's full name, or email as fallback.
    pub fn display_name_or_email(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.email)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// Token is valid but no account can be resolved for it.
    #[error("User not found")]
    UserNotFound,

    /// The account was deactivated by an administrator.
    #[error("Account disabled")]
    AccountDisabled,

    /// User exists but lacks required permissions for this action.
    #[error("Insufficient permissions")]
    InsufficientPermissions,

    /// The authentication service is unavailable (network, config, database).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::UserNotFound
        )
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_email() {
        let named = AuthenticatedUser::new(
            UserId::new(),
            "lan@example.vn",
            Role::Parent,
            Some("Nguyễn Thị Lan".to_string()),
        );
        let anonymous = AuthenticatedUser::new(UserId::new(), "minh@example.vn", Role::Teacher, None);

        assert_eq!(named.display_name_or_email(), "Nguyễn Thị Lan");
        assert_eq!(anonymous.display_name_or_email(), "minh@example.vn");
    }

    #[test]
    fn is_admin_checks_role() {
        let admin = AuthenticatedUser::new(UserId::new(), "a@example.vn", Role::Admin, None);
        let parent = AuthenticatedUser::new(UserId::new(), "p@example.vn", Role::Parent, None);
        assert!(admin.is_admin());
        assert!(!parent.is_admin());
    }

    #[test]
    fn auth_error_service_unavailable_displays_message() {
        let err = AuthError::service_unavailable("Connection refused");
        assert_eq!(format!("{}", err), "Auth service unavailable: Connection refused");
    }

    #[test]
    fn auth_error_requires_reauthentication_for_token_errors() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(AuthError::UserNotFound.requires_reauthentication());
        assert!(!AuthError::AccountDisabled.requires_reauthentication());
        assert!(!AuthError::InsufficientPermissions.requires_reauthentication());
        assert!(!AuthError::service_unavailable("").requires_reauthentication());
    }

    #[test]
    fn auth_error_is_transient_for_service_errors() {
        assert!(AuthError::service_unavailable("timeout").is_transient());
        assert!(!AuthError::InvalidToken.is_transient());
        assert!(!AuthError::AccountDisabled.is_transient());
    }
}
