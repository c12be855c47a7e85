//! Mock session validator for tests and local development.
//!
//! ```ignore
//! let validator = MockSessionValidator::new()
//!     .with_identity("parent-token", VerifiedIdentity::new(id, Some("p@example.vn".into()), None));
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, UserId};
use crate::ports::{SessionValidator, VerifiedIdentity};

/// Maps fixed tokens to identities. Unknown tokens return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, VerifiedIdentity>>,
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to an identity.
    pub fn with_identity(self, token: impl Into<String>, identity: VerifiedIdentity) -> Self {
        self.add_token(token, identity);
        self
    }

    /// Adds a token for `user_id` with an email derived from the token.
    pub fn with_user(self, token: impl Into<String>, user_id: UserId) -> Self {
        let token = token.into();
        let email = format!("{}@test.example.vn", token);
        self.with_identity(token, VerifiedIdentity::new(user_id, Some(email), None))
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self
            .force_error
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(error);
        self
    }

    /// Registers a new valid token at runtime.
    pub fn add_token(&self, token: impl Into<String>, identity: VerifiedIdentity) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.into(), identity);
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<VerifiedIdentity, AuthError> {
        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
