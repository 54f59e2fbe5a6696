//! Completion providers for intent classification
//!
//! This crate wraps the language model behind a single async call: a finished
//! prompt and a temperature go in, free text comes out.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use async_trait::async_trait;
use intenteval_core::config::ModelConfig;
use intenteval_core::error::{Error, Result};
use std::sync::Arc;
use tracing::info;

pub mod error;
mod mock;
mod openai;

pub use error::InferenceError;
pub use mock::{MockCompletionProvider, DEFAULT_MOCK_RESPONSE};
pub use openai::OpenAiCompatibleProvider;

/// Trait for completion providers
///
/// Implementations must pass `temperature` through to the model unchanged and
/// must not retry on their own; the evaluator treats any error as "no response".
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a completion for a fully rendered prompt
    async fn complete(
        &self,
        prompt: &str,
        temperature: f32,
    ) -> std::result::Result<String, InferenceError>;

    /// Identifier of the model behind this provider (recorded in exports)
    fn model_name(&self) -> &str;
}

/// Create a new completion provider based on configuration
///
/// # Arguments
/// * `config` - Model configuration including provider type
pub async fn create_completion_provider(
    config: &ModelConfig,
) -> Result<Arc<dyn CompletionProvider>> {
    match config.provider.as_str() {
        "openai" => {
            info!("Creating OpenAI-compatible completion provider");
            let provider = OpenAiCompatibleProvider::new(
                config.model.clone(),
                config.api_base_url.clone(),
                config.resolve_api_key(),
                config.timeout_secs,
                config.max_tokens,
            )?;

            // Perform health check (non-blocking)
            provider.check_health().await;

            Ok(Arc::new(provider))
        }
        "mock" => {
            info!("Creating mock completion provider");
            Ok(Arc::new(MockCompletionProvider::new(config.model.clone())))
        }
        other => Err(Error::config(format!(
            "Unknown completion provider: '{other}'. Valid providers: openai, mock"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_factory_builds_mock() {
        let config = ModelConfig {
            provider: "mock".to_string(),
            model: "mock-model".to_string(),
            ..Default::default()
        };
        let provider = create_completion_provider(&config).await.unwrap();
        assert_eq!(provider.model_name(), "mock-model");
        let text = provider.complete("anything", 0.1).await.unwrap();
        assert_eq!(text, DEFAULT_MOCK_RESPONSE);
    }

    #[tokio::test]
    async fn test_factory_rejects_unknown_provider() {
        let config = ModelConfig {
            provider: "carrier-pigeon".to_string(),
            ..Default::default()
        };
        let err = create_completion_provider(&config)
            .await
            .err()
            .expect("unknown provider must fail");
        assert!(err.to_string().contains("Unknown completion provider"));
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = InferenceError::Unavailable("connection refused".to_string()).into();
        assert!(matches!(err, Error::Inference(_)));
        assert!(err.to_string().contains("connection refused"));

        let err: Error = InferenceError::ConfigError("bad".to_string()).into();
        assert!(matches!(err, Error::Config(_)));
    }
}
