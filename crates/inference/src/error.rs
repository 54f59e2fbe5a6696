//! Error types for the inference module

use std::fmt;

/// Errors that can occur while requesting a completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    /// The inference server could not be reached or did not answer in time
    Unavailable(String),

    /// The server answered, but not with a usable completion
    InvalidResponse(String),

    /// Configuration error
    ConfigError(String),
}

impl InferenceError {
    /// Whether the collaborator itself was unreachable
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl fmt::Display for InferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "Inference unavailable: {msg}"),
            Self::InvalidResponse(msg) => write!(f, "Invalid inference response: {msg}"),
            Self::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for InferenceError {}

impl From<InferenceError> for intenteval_core::error::Error {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::ConfigError(msg) => intenteval_core::error::Error::config(msg),
            other => intenteval_core::error::Error::inference(other.to_string()),
        }
    }
}
