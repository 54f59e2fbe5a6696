//! OpenAI-compatible chat completion provider
//!
//! Works against `mlc_llm serve`, vLLM, llama.cpp server and anything else
//! exposing `POST {base}/chat/completions`.

use crate::error::InferenceError;
use crate::CompletionProvider;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Request payload for the chat completions API
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response from the chat completions API
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible completion provider
pub struct OpenAiCompatibleProvider {
    client: Client,
    model: String,
    api_base_url: String,
    api_key: Option<String>,
    max_tokens: u32,
}

impl OpenAiCompatibleProvider {
    /// Create a new OpenAI-compatible provider
    ///
    /// # Arguments
    /// * `model` - Model name (e.g., "Llama-3.2-3B-Instruct-q4f16_1-MLC")
    /// * `api_base_url` - Base URL including `/v1` (e.g., "http://localhost:8000/v1")
    /// * `api_key` - Optional bearer token
    /// * `timeout_secs` - Request timeout in seconds
    /// * `max_tokens` - Completion token budget per request
    pub fn new(
        model: String,
        api_base_url: String,
        api_key: Option<String>,
        timeout_secs: u64,
        max_tokens: u32,
    ) -> Result<Self, InferenceError> {
        info!("Initializing OpenAI-compatible completion provider");
        info!("  Model: {model}");
        info!("  API Base URL: {api_base_url}");
        info!("  Timeout: {timeout_secs}s");
        info!("  Max tokens: {max_tokens}");

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| InferenceError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            model,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            api_key,
            max_tokens,
        })
    }

    /// Check if the completion API is healthy (non-blocking, warns on failure)
    pub async fn check_health(&self) {
        debug!("Checking completion API health");

        let models_url = format!("{}/models", self.api_base_url);
        let mut request = self.client.get(&models_url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        match request.send().await {
            Ok(response) => {
                if response.status().is_success() {
                    info!("Completion API health check passed");
                } else {
                    warn!(
                        "Completion API health check failed with status: {}",
                        response.status()
                    );
                    warn!("  The inference server may not be running or still loading the model.");
                }
            }
            Err(e) => {
                warn!("Completion API health check failed: {e}");
                warn!("  The inference server may not be running or still loading the model.");
                warn!("  Start one with: mlc_llm serve <model>");
            }
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompatibleProvider {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, InferenceError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
            max_tokens: self.max_tokens,
            stream: false,
        };

        let url = format!("{}/chat/completions", self.api_base_url);
        debug!("Sending completion request ({} prompt chars)", prompt.len());

        let mut builder = self.client.post(&url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            InferenceError::Unavailable(format!("Completion API request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            let message = format!("Completion API returned error {status}: {error_text}");
            return Err(if status == StatusCode::SERVICE_UNAVAILABLE {
                InferenceError::Unavailable(message)
            } else {
                InferenceError::InvalidResponse(message)
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            InferenceError::InvalidResponse(format!("Failed to parse completion response: {e}"))
        })?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                InferenceError::InvalidResponse("Completion response had no content".to_string())
            })?;

        debug!("Completion received ({} chars)", text.len());
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
