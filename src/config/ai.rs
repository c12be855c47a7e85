//! AI provider configuration (OpenAI-compatible Chat Completions)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_COMPLETION_TOKENS: u32 = 16_384;
const MAX_RETRIES: u32 = 10;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    pub openai_api_key: Secret<String>,

    /// Model used for chat and generation
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL; point at a compatible gateway to switch vendors
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failures
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// Completion token budget per call
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl AiConfig {
    pub fn new(openai_api_key: impl Into<String>) -> Self {
        Self {
            openai_api_key: Secret::new(openai_api_key.into()),
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            max_tokens: default_max_tokens(),
        }
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.openai_api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("GIASU__AI__OPENAI_API_KEY"));
        }
        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(ValidationError::InvalidAiBaseUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_tokens == 0 || self.max_tokens > MAX_COMPLETION_TOKENS {
            return Err(ValidationError::InvalidMaxTokens);
        }
        if self.max_retries > MAX_RETRIES {
            return Err(ValidationError::InvalidMaxRetries);
        }
        Ok(())
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    2
}

fn default_max_tokens() -> u32 {
    2_048
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::new("sk-test");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.max_tokens, 2_048);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_missing_key() {
        assert_eq!(
            AiConfig::new("").validate(),
            Err(ValidationError::MissingRequired("GIASU__AI__OPENAI_API_KEY"))
        );
    }

    #[test]
    fn test_validation_max_retries_cap() {
        let ten = AiConfig {
            max_retries: 10,
            ..AiConfig::new("sk-test")
        };
        let too_many = AiConfig {
            max_retries: 40,
            ..AiConfig::new("sk-test")
        };
        assert!(ten.validate().is_ok());
        assert_eq!(too_many.validate(), Err(ValidationError::InvalidMaxRetries));
    }

    #[test]
    fn test_validation_bad_base_url() {
        let config = AiConfig {
            base_url: "api.openai.com".to_string(),
            ..AiConfig::new("sk-test")
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidAiBaseUrl));
    }

    #[test]
    fn test_validation_max_tokens_bounds() {
        let zero = AiConfig {
            max_tokens: 0,
            ..AiConfig::new("sk-test")
        };
        let huge = AiConfig {
            max_tokens: 100_000,
            ..AiConfig::new("sk-test")
        };
        assert_eq!(zero.validate(), Err(ValidationError::InvalidMaxTokens));
        assert_eq!(huge.validate(), Err(ValidationError::InvalidMaxTokens));
    }
}
