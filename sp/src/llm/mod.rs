//! LLM Client module for studyplan
//!
//! Provides the provider-agnostic completion client used by the study module
//! generator, with Gemini, Anthropic and OpenAI backends.

use std::sync::Arc;

use tracing::debug;

mod anthropic;
pub mod client;
mod error;
mod gemini;
mod openai;
mod types;

pub use anthropic::AnthropicClient;
pub use client::LlmClient;
pub use error::LlmError;
pub use gemini::GeminiClient;
pub use openai::OpenAIClient;
pub use types::{CompletionRequest, CompletionResponse, Message, Role, StopReason, TokenUsage};

use crate::config::LlmConfig;

/// Create an LLM client based on the provider specified in config
///
/// Supports "gemini", "anthropic" and "openai" providers.
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "gemini" => {
            debug!("create_client: creating Gemini client");
            Ok(Arc::new(GeminiClient::from_config(config)?))
        }
        "anthropic" => {
            debug!("create_client: creating Anthropic client");
            Ok(Arc::new(AnthropicClient::from_config(config)?))
        }
        "openai" => {
            debug!("create_client: creating OpenAI client");
            Ok(Arc::new(OpenAIClient::from_config(config)?))
        }
        other => {
            debug!(provider = %other, "create_client: unknown provider");
            Err(LlmError::InvalidResponse(format!(
                "Unknown LLM provider: '{}'. Supported: gemini, anthropic, openai",
                other
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_create_client_unknown_provider() {
        let config = LlmConfig {
            provider: "carrier-pigeon".to_string(),
            ..Default::default()
        };
        let err = create_client(&config).err().unwrap();
        assert!(err.to_string().contains("carrier-pigeon"));
    }

    #[test]
    #[serial]
    fn test_create_client_with_key() {
        let config = LlmConfig {
            api_key_env: "STUDYPLAN_TEST_CREATE_CLIENT".to_string(),
            ..Default::default()
        };
        unsafe { std::env::set_var("STUDYPLAN_TEST_CREATE_CLIENT", "k") };
        let client = create_client(&config).unwrap();
        assert_eq!(client.provider(), "gemini");
        assert_eq!(client.model(), config.model);
        unsafe { std::env::remove_var("STUDYPLAN_TEST_CREATE_CLIENT") };
    }

    #[test]
    #[serial]
    fn test_create_client_without_key_fails() {
        let config = LlmConfig {
            provider: "anthropic".to_string(),
            api_key_env: "STUDYPLAN_TEST_CREATE_CLIENT_MISSING".to_string(),
            ..Default::default()
        };
        unsafe { std::env::remove_var("STUDYPLAN_TEST_CREATE_CLIENT_MISSING") };
        assert!(create_client(&config).is_err());
    }
}
