//! Core types for the intenteval search-intent evaluation harness
//!
//! This crate provides the foundational pieces shared by the other crates:
//!
//! - **Cases**: labeled test cases and their label enumerations
//! - **Results**: per-case evaluation results
//! - **Configuration**: layered configuration (defaults, TOML, environment)
//! - **Error handling**: unified error types
//!

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod cases;
pub mod config;
pub mod error;
pub mod results;

// Re-export main types for convenience
pub use cases::{Difficulty, IntentLabel, TestCase};
pub use config::{Config, EvaluationConfig, ModelConfig};
pub use error::{Error, Result, ResultExt};
pub use results::EvalResult;
