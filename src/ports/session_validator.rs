//! Session validation port for access token validation.
//!
//! Implementations verify the bearer token issued by the identity provider
//! and return *who* the caller is. They never decide what the caller may
//! do: roles are loaded from the users table afterwards.
//!
//! # Security Requirements
//!
//! All implementations MUST validate:
//! - **Signature**: Token was issued with the project secret
//! - **Audience (aud)**: Token must be intended for this application
//! - **Expiry (exp)**: Token must not be expired

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, UserId};

/// Identity claims from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// Subject of the token.
    pub user_id: UserId,
    pub email: Option<String>,
    /// Name from the provider's user metadata, if any.
    pub full_name: Option<String>,
}

impl VerifiedIdentity {
    pub fn new(user_id: UserId, email: Option<String>, full_name: Option<String>) -> Self {
        Self {
            user_id,
            email,
            full_name,
        }
    }
}

/// Validates access tokens and extracts user identity.
///
/// # Contract
///
/// - Return `AuthError::InvalidToken` for malformed/bad signature tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<VerifiedIdentity, AuthError>;
}
