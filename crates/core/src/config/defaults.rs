//! Default values and functions for configuration

// Default constants
pub(crate) const DEFAULT_PROVIDER: &str = "openai";
pub(crate) const DEFAULT_MODEL: &str = "Llama-3.2-3B-Instruct-q4f16_1-MLC";
pub(crate) const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/v1";

/// Providers accepted by `model.provider`
pub(crate) const VALID_PROVIDERS: [&str; 2] = ["openai", "mock"];

pub(crate) fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

pub(crate) fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

pub(crate) fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

pub(crate) fn default_timeout_secs() -> u64 {
    60
}

pub(crate) fn default_max_tokens() -> u32 {
    200
}

pub(crate) fn default_temperature() -> f32 {
    0.1
}

pub(crate) fn default_verbose() -> bool {
    true
}
