//! Search-intent classification evaluation
//!
//! Runs a labeled dataset through a completion provider, parses each response
//! into an action/chat prediction and scores the predictions:
//!
//! - [`dataset`]: built-in labeled cases, category filtering, JSON loading
//! - [`prompts`]: the classification prompt template
//! - [`parser`]: structured prediction extraction from free-form output
//! - [`evaluator`]: the sequential, cancellable evaluation loop
//! - [`metrics`]: accuracy, confusion matrix, P/R/F1, confidence, grouping
//! - [`failures`], [`report`]: failure analysis and text reports
//! - [`export`]: JSON and CSV export

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod dataset;
pub mod evaluator;
pub mod export;
pub mod failures;
pub mod metrics;
pub mod parser;
pub mod prompts;
pub mod report;

pub use dataset::{builtin_cases, filter_by_category, load_cases_from_file};
pub use evaluator::{
    CaseOutcome, Classification, EvalProgress, EvaluationRun, EvaluatorConfig, IntentEvaluator,
    SkipReason, SkippedCase,
};
pub use export::{export_results, ExportFormat};
pub use failures::{analyze_failures, FailureAnalysis};
pub use metrics::{
    compute_metrics, group_by_category, group_by_difficulty, AggregateMetrics, ConfidenceStats,
    ConfusionMatrix, GroupStats,
};
pub use parser::{parse_response, ParsedPrediction, ResponseParseError};
pub use prompts::PromptTemplate;
pub use report::{render_failure_analysis, render_report};
