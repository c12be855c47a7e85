//! AI Provider Adapters.
//!
//! - `OpenAIProvider` - OpenAI-compatible Chat Completions API
//! - `MockAIProvider` - Configurable mock for tests and local runs

mod mock_provider;
mod openai_provider;

pub use mock_provider::{MockAIProvider, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
