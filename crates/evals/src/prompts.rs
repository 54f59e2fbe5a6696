//! Prompt template for search-intent classification

use intenteval_core::error::{Error, Result, ResultExt};
use std::path::Path;
use tracing::debug;

/// Placeholder substituted with the user query
pub const MESSAGE_PLACEHOLDER: &str = "{message}";

const DEFAULT_TEMPLATE: &str = include_str!("../assets/prompts/search_intent.txt");

/// Prompt text with a single `{message}` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Build a template, rejecting text that has nowhere to put the query
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into().trim().to_string();
        if !template.contains(MESSAGE_PLACEHOLDER) {
            return Err(Error::invalid_input(format!(
                "Prompt template is missing the {MESSAGE_PLACEHOLDER} placeholder"
            )));
        }
        Ok(Self { template })
    }

    /// Load a template from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read prompt template {}", path.display()))?;
        debug!("Loaded prompt template from {}", path.display());
        Self::new(content)
    }

    /// Load `path` when given, otherwise the built-in template
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Substitute `query` for every placeholder occurrence
    pub fn render(&self, query: &str) -> String {
        self.template.replace(MESSAGE_PLACEHOLDER, query)
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.trim().to_string(),
        }
    }
}
