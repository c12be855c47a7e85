//! Supabase Auth adapter for JWT validation.
//!
//! Supabase signs user access tokens with the project's JWT secret (HS256).
//! This adapter verifies:
//!
//! - **Signature** against the shared secret
//! - **Expiry (exp)**
//! - **Audience (aud)**, `authenticated` for signed-in users
//! - **Issuer (iss)** when one is configured (`https://<ref>.supabase.co/auth/v1`)
//!
//! The `role` claim Supabase puts in the token is a Postgres role
//! (`authenticated`), unrelated to the application role, and is ignored.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::domain::foundation::{AuthError, UserId};
use crate::ports::{SessionValidator, VerifiedIdentity};

/// Configuration for the Supabase JWT validator.
#[derive(Debug, Clone)]
pub struct SupabaseJwtConfig {
    pub jwt_secret: Secret<String>,
    pub audience: String,
    pub issuer: Option<String>,
}

impl SupabaseJwtConfig {
    pub fn new(jwt_secret: Secret<String>) -> Self {
        Self {
            jwt_secret,
            audience: "authenticated".to_string(),
            issuer: None,
        }
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }
}

#[derive(Debug, Deserialize)]
struct SupabaseClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: Option<UserMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Validates Supabase access tokens locally, without a network call.
pub struct SupabaseJwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SupabaseJwtValidator {
    pub fn new(config: SupabaseJwtConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.expose_secret().as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&config.audience]);
        if let Some(ref issuer) = config.issuer {
            validation.set_issuer(&[issuer]);
        }
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);

        Self {
            decoding_key,
            validation,
        }
    }
}

#[async_trait]
impl SessionValidator for SupabaseJwtValidator {
    async fn validate(&self, token: &str) -> Result<VerifiedIdentity, AuthError> {
        let data = decode::<SupabaseClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    ErrorKind::InvalidIssuer => {
                        tracing::warn!("Invalid issuer in token");
                        AuthError::InvalidToken
                    }
                    ErrorKind::InvalidAudience => {
                        tracing::warn!("Invalid audience in token");
                        AuthError::InvalidToken
                    }
                    _ => {
                        tracing::debug!("Token validation failed: {}", e);
                        AuthError::InvalidToken
                    }
                }
            })?;

        let claims = data.claims;
        let user_id: UserId = claims.sub.parse().map_err(|_| {
            tracing::warn!(sub = %claims.sub, "Token subject is not a UUID");
            AuthError::InvalidToken
        })?;

        let metadata = claims.user_metadata.unwrap_or_default();
        Ok(VerifiedIdentity::new(
            user_id,
            claims.email.filter(|e| !e.is_empty()),
            metadata.full_name.or(metadata.name),
        ))
    }
}

impl std::fmt::Debug for SupabaseJwtValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseJwtValidator")
            .field("audience", &self.validation.aud)
            .field("issuer", &self.validation.iss)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const SECRET: &str = "super-secret-jwt-token-with-at-least-32-characters";
    const ISSUER: &str = "https://abcd.supabase.co/auth/v1";

    fn validator() -> SupabaseJwtValidator {
        SupabaseJwtValidator::new(
            SupabaseJwtConfig::new(Secret::new(SECRET.to_string())).with_issuer(ISSUER),
        )
    }

    fn token(claims: serde_json::Value, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(sub: &str, exp_offset_secs: i64) -> serde_json::Value {
        json!({
            "sub": sub,
            "aud": "authenticated",
            "iss": ISSUER,
            "exp": chrono::Utc::now().timestamp() + exp_offset_secs,
            "email": "lan@example.vn",
            "role": "authenticated",
            "user_metadata": { "full_name": "Nguyễn Thị Lan" }
        })
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Accepted tokens
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn accepts_valid_token() {
        let id = UserId::new();
        let identity = validator()
            .validate(&token(claims(&id.to_string(), 3600), SECRET))
            .await
            .unwrap();

        assert_eq!(identity.user_id, id);
        assert_eq!(identity.email.as_deref(), Some("lan@example.vn"));
        assert_eq!(identity.full_name.as_deref(), Some("Nguyễn Thị Lan"));
    }

    #[tokio::test]
    async fn issuer_is_optional_when_not_configured() {
        let v = SupabaseJwtValidator::new(SupabaseJwtConfig::new(Secret::new(SECRET.to_string())));
        let mut c = claims(&UserId::new().to_string(), 3600);
        c.as_object_mut().unwrap().remove("iss");
        assert!(v.validate(&token(c, SECRET)).await.is_ok());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Rejected tokens
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn rejects_expired_token() {
        let t = token(claims(&UserId::new().to_string(), -3600), SECRET);
        assert_eq!(validator().validate(&t).await, Err(AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn rejects_wrong_signature() {
        let t = token(claims(&UserId::new().to_string(), 3600), "another-secret-another-secret-00");
        assert_eq!(validator().validate(&t).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn rejects_wrong_audience() {
        let mut c = claims(&UserId::new().to_string(), 3600);
        c["aud"] = json!("anon");
        assert_eq!(validator().validate(&token(c, SECRET)).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn rejects_wrong_issuer() {
        let mut c = claims(&UserId::new().to_string(), 3600);
        c["iss"] = json!("https://evil.example.com");
        assert_eq!(validator().validate(&token(c, SECRET)).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn rejects_non_uuid_subject() {
        let t = token(claims("user-123", 3600), SECRET);
        assert_eq!(validator().validate(&t).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn rejects_garbage() {
        assert_eq!(validator().validate("not.a.jwt").await, Err(AuthError::InvalidToken));
    }

    #[test]
    fn debug_does_not_leak_secret() {
        assert!(!format!("{:?}", validator()).contains(SECRET));
    }
}
