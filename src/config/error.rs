//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddr(String),

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("JWT secret must be at least 32 characters")]
    JwtSecretTooShort,

    #[error("Auth issuer must use HTTPS in production")]
    IssuerMustBeHttps,

    #[error("AI base URL must be an http(s) URL")]
    InvalidAiBaseUrl,

    #[error("AI max_tokens must be between 1 and 16384")]
    InvalidMaxTokens,

    #[error("AI max_retries must be at most 10")]
    InvalidMaxRetries,

    #[error("UTC offset must be between -12 and 14 hours")]
    InvalidUtcOffset,

    #[error("Bank BIN must be 6 digits")]
    InvalidBankBin,

    #[error("Bank account number must contain only digits")]
    InvalidAccountNumber,
}
