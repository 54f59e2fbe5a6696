//! Configuration loading from files and environment variables

use crate::error::{Error, Result};
use config::{Config as ConfigLib, ConfigBuilder as LibConfigBuilder, Environment, File};
use std::path::Path;

use super::defaults::*;
use super::{global_config_path, Config};

/// Helper to set a config default with consistent error mapping
fn set_config_default<T: Into<config::Value>>(
    builder: LibConfigBuilder<config::builder::DefaultState>,
    key: &str,
    value: T,
) -> Result<LibConfigBuilder<config::builder::DefaultState>> {
    builder
        .set_default(key, value)
        .map_err(|e| Error::config(format!("Failed to set {key} default: {e}")))
}

impl Config {
    /// Loads configuration from a TOML file with environment variable overrides
    ///
    /// Environment variables are prefixed with `INTENTEVAL_` and use double underscores
    /// for nested values. For example:
    /// - `INTENTEVAL_MODEL__API_BASE_URL=http://gpu-box:8000/v1`
    /// - `INTENTEVAL_EVALUATION__TEMPERATURE=0.2`
    pub fn from_file(path: &Path) -> Result<Self> {
        let builder = ConfigLib::builder();

        // The config crate doesn't apply serde defaults for keys it never saw
        let builder = set_config_default(builder, "model.provider", default_provider())?;
        let builder = set_config_default(builder, "model.model", default_model())?;
        let builder = set_config_default(builder, "model.api_base_url", default_api_base_url())?;
        let builder = set_config_default(
            builder,
            "model.timeout_secs",
            default_timeout_secs() as i64,
        )?;
        let builder =
            set_config_default(builder, "model.max_tokens", default_max_tokens() as i64)?;
        let builder = set_config_default(
            builder,
            "evaluation.temperature",
            f64::from(default_temperature()),
        )?;
        let mut builder = set_config_default(builder, "evaluation.verbose", default_verbose())?;

        // Add the config file if it exists
        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        // Add environment variables with INTENTEVAL_ prefix
        builder = builder.add_source(
            Environment::with_prefix("INTENTEVAL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize config: {e}")))
    }

    /// Creates a config from a TOML string (useful for testing)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from a single file
    ///
    /// Precedence (lowest to highest):
    /// 1. Hardcoded defaults
    /// 2. Config file (~/.intenteval/config.toml or custom --config path)
    /// 3. Environment variables (INTENTEVAL_*)
    ///
    /// An explicitly requested file must exist; the global file is optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(p) => {
                if !p.exists() {
                    return Err(Error::config(format!(
                        "Config file not found: {}",
                        p.display()
                    )));
                }
                p.to_path_buf()
            }
            None => global_config_path()?,
        };
        Self::from_file(&path)
    }
}
