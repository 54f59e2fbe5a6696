//! Mock completion provider for testing and dry runs

use crate::error::InferenceError;
use crate::CompletionProvider;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Response returned once the script is exhausted
pub const DEFAULT_MOCK_RESPONSE: &str =
    r#"{"isSearch": false, "searchQuery": null, "confidence": 0.5, "reasoning": "mock provider"}"#;

/// Mock provider that replays scripted responses in call order
///
/// A `None` entry in the script simulates an unreachable server for that call.
pub struct MockCompletionProvider {
    model: String,
    script: Mutex<VecDeque<Option<String>>>,
    calls: Mutex<Vec<(String, f32)>>,
}

impl MockCompletionProvider {
    /// Create a mock that always answers with [`DEFAULT_MOCK_RESPONSE`]
    pub fn new(model: String) -> Self {
        Self {
            model,
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that replays `script` before falling back to the default response
    pub fn with_script<I, S>(model: String, script: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let script = script.into_iter().map(|entry| entry.map(Into::into)).collect();
        Self {
            model,
            script: Mutex::new(script),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Prompts and temperatures received so far
    pub fn calls(&self) -> Vec<(String, f32)> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, InferenceError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((prompt.to_string(), temperature));

        let next = self
            .script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();

        match next {
            Some(Some(text)) => Ok(text),
            Some(None) => Err(InferenceError::Unavailable(
                "mock provider scripted as unavailable".to_string(),
            )),
            None => Ok(DEFAULT_MOCK_RESPONSE.to_string()),
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
