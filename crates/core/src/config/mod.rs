//! Configuration module for intenteval
//!
//! This module provides configuration structures and loading mechanisms for the
//! evaluation harness. Configuration can be loaded from TOML files and/or
//! environment variables, and the CLI applies its flags on top.

mod defaults;
mod loading;


use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use defaults::*;

/// Environment variable consulted when `model.api_key` is not set
pub const API_KEY_ENV_VAR: &str = "INTENTEVAL_API_KEY";

/// Returns the path to the global configuration file
///
/// The global config is stored at `~/.intenteval/config.toml`.
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".intenteval").join("config.toml"))
}

/// Main configuration structure for intenteval
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Inference provider configuration
    #[serde(default)]
    pub model: ModelConfig,

    /// Evaluation run configuration
    #[serde(default)]
    pub evaluation: EvaluationConfig,
}

/// Configuration for the inference provider
///
/// # Providers
/// - `openai` (default): any OpenAI-compatible `/chat/completions` endpoint
///   (`mlc_llm serve`, vLLM, llama.cpp server)
/// - `mock`: scripted provider that never leaves the process
#[derive(Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Provider type: "openai" (default), "mock"
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model identifier sent with each request and recorded in exports
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL, including the `/v1` suffix
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Bearer token (or use INTENTEVAL_API_KEY env var)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Completion token budget per request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_base_url: default_api_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***REDACTED***"))
            .field("timeout_secs", &self.timeout_secs)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl ModelConfig {
    /// API key from config, falling back to the INTENTEVAL_API_KEY env var
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV_VAR).ok())
    }
}

/// Configuration for an evaluation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Generation temperature passed unchanged to the provider
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Only evaluate cases whose category contains this substring
    #[serde(default)]
    pub dataset_filter: Option<String>,

    /// Emit per-case diagnostics
    #[serde(default = "default_verbose")]
    pub verbose: bool,

    /// Prompt template file overriding the built-in template
    #[serde(default)]
    pub prompt_path: Option<PathBuf>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            dataset_filter: None,
            verbose: default_verbose(),
            prompt_path: None,
        }
    }
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if !VALID_PROVIDERS.contains(&self.model.provider.as_str()) {
            return Err(Error::config(format!(
                "Invalid provider '{}'. Must be one of: {:?}",
                self.model.provider, VALID_PROVIDERS
            )));
        }

        if self.model.model.trim().is_empty() {
            return Err(Error::config("model.model must not be empty".to_string()));
        }

        if self.model.max_tokens == 0 {
            return Err(Error::config(
                "model.max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.model.timeout_secs == 0 {
            return Err(Error::config(
                "model.timeout_secs must be greater than 0".to_string(),
            ));
        }

        let temperature = self.evaluation.temperature;
        if !(0.0..=1.0).contains(&temperature) {
            return Err(Error::config(format!(
                "evaluation.temperature ({temperature}) must be between 0.0 and 1.0"
            )));
        }

        Ok(())
    }
}
