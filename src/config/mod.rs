//! Application configuration module
//!
//! Configuration is loaded from environment variables with the `GIASU`
//! prefix using the `config` and `dotenvy` crates. Nested values use
//! double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use giasu::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod auth;
mod database;
mod error;
mod payment;
mod quota;
mod server;

pub use ai::AiConfig;
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use quota::QuotaConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (Supabase Postgres)
    pub database: DatabaseConfig,

    /// Authentication configuration (Supabase JWT)
    pub auth: AuthConfig,

    /// OpenAI-compatible provider configuration
    pub ai: AiConfig,

    /// Daily token limits and reset time zone
    #[serde(default)]
    pub quota: QuotaConfig,

    /// Receiving bank account for manual transfers
    pub payment: PaymentConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads every `GIASU__*` variable.
    ///
    /// - `GIASU__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `GIASU__PAYMENT__ACCOUNT_NUMBER=0011...` -> `payment.account_number`
    ///
    /// Values are kept as strings until deserialization so account numbers
    /// keep their leading zeros.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// cannot be parsed into its expected type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GIASU")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.ai.validate()?;
        self.quota.validate()?;
        self.payment.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
