//! Library interface for the intenteval CLI
//!
//! This module exposes the evaluation wiring for testing while keeping
//! argument parsing and process setup in main.rs.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod evaluation;
pub mod progress;

pub use evaluation::{
    apply_overrides, build_evaluator, export_run, load_cases, run_evaluation, run_single_query,
    EvalOverrides,
};
