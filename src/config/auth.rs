//! Authentication configuration (Supabase Auth)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

const MIN_JWT_SECRET_LEN: usize = 32;

/// Supabase access token verification settings
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Project JWT secret (Settings → API → JWT Secret)
    pub jwt_secret: Secret<String>,

    /// Expected `aud` claim
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Expected `iss` claim, e.g. `https://<ref>.supabase.co/auth/v1`
    pub issuer: Option<String>,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: Secret::new(jwt_secret.into()),
            audience: default_audience(),
            issuer: None,
        }
    }

    /// Validate auth configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("GIASU__AUTH__JWT_SECRET"));
        }
        if secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort);
        }
        if self.audience.trim().is_empty() {
            return Err(ValidationError::MissingRequired("GIASU__AUTH__AUDIENCE"));
        }
        if *environment == Environment::Production {
            if let Some(ref issuer) = self.issuer {
                if !issuer.starts_with("https://") {
                    return Err(ValidationError::IssuerMustBeHttps);
                }
            }
        }
        Ok(())
    }
}

fn default_audience() -> String {
    "authenticated".to_string()
}
