//! Wiring between configuration, provider and evaluator for the CLI

use crate::progress::create_progress_bar;
use anyhow::{Context, Result};
use intenteval_core::{Config, IntentLabel, TestCase};
use intenteval_evals::{
    builtin_cases, export_results, load_cases_from_file, CaseOutcome, Classification, EvalProgress,
    EvaluationRun, EvaluatorConfig, IntentEvaluator, PromptTemplate,
};
use intenteval_inference::create_completion_provider;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Values given on the command line that take precedence over configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvalOverrides {
    pub temperature: Option<f32>,
    pub dataset_filter: Option<String>,
    pub quiet: bool,
}

/// Apply CLI overrides on top of the loaded configuration
pub fn apply_overrides(config: &mut Config, overrides: &EvalOverrides) {
    if let Some(temperature) = overrides.temperature {
        config.evaluation.temperature = temperature;
    }
    if let Some(filter) = &overrides.dataset_filter {
        config.evaluation.dataset_filter = Some(filter.clone());
    }
    if overrides.quiet {
        config.evaluation.verbose = false;
    }
}

/// Create the provider and prompt described by `config`
pub async fn build_evaluator(config: &Config) -> Result<IntentEvaluator> {
    let provider = create_completion_provider(&config.model)
        .await
        .context("Failed to create completion provider")?;
    let prompt = PromptTemplate::load(config.evaluation.prompt_path.as_deref())
        .context("Failed to load prompt template")?;

    Ok(IntentEvaluator::new(
        provider,
        prompt,
        EvaluatorConfig::from(&config.evaluation),
    ))
}

/// Custom dataset when a path is given, otherwise the built-in cases
pub fn load_cases(path: Option<&Path>) -> Result<Vec<TestCase>> {
    match path {
        Some(path) => load_cases_from_file(path).context("Failed to load test cases"),
        None => Ok(builtin_cases()),
    }
}

/// Run the evaluator, drawing a progress bar unless per-case logging is on
pub async fn run_evaluation(
    evaluator: &IntentEvaluator,
    cases: Vec<TestCase>,
    cancel: &CancellationToken,
) -> EvaluationRun {
    if evaluator.config().verbose {
        return evaluator.run(cases, cancel).await;
    }

    let mut pb = None;
    let run = evaluator
        .run_with_progress(cases, cancel, |event| match event {
            EvalProgress::Started { total } => pb = Some(create_progress_bar(total)),
            EvalProgress::CaseCompleted { outcome, .. } => {
                if let Some(pb) = &pb {
                    if let CaseOutcome::Skipped(skipped) = outcome {
                        pb.set_message(format!("skipped {:?}", skipped.query));
                    }
                    pb.inc(1);
                }
            }
        })
        .await;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    run
}

/// Write `run` to `path`, failing when the export could not be written
pub fn export_run(path: &Path, run: &EvaluationRun, model: &str) -> Result<()> {
    export_results(path, run, model)
        .with_context(|| format!("Failed to export results to {}", path.display()))?;
    Ok(())
}

/// Expected label of `query` if it appears in the built-in dataset
pub fn expected_label(query: &str) -> Option<IntentLabel> {
    builtin_cases()
        .into_iter()
        .find(|case| case.query.eq_ignore_ascii_case(query.trim()))
        .map(|case| case.expected)
}

/// Human-readable output of a single-query classification
pub fn render_classification(
    query: &str,
    temperature: f32,
    classification: &Classification,
) -> String {
    let mut lines = vec![
        format!("Testing: {query:?}"),
        format!("Temperature: {temperature}"),
        String::new(),
        format!("Raw response: {:?}", classification.raw_response),
        String::new(),
        "Parsed result:".to_string(),
    ];

    match &classification.prediction {
        Ok(prediction) => {
            lines.push(format!("   Category: {}", prediction.intent_category));
            lines.push(format!("   Confidence: {}", prediction.confidence));
            lines.push(format!("   Reasoning: {}", prediction.reasoning));
            if let Some(search_query) = &prediction.search_query {
                lines.push(format!("   Search query: {search_query}"));
            }
            if let Some(expected) = expected_label(query) {
                let verdict = if expected == prediction.intent_category {
                    "CORRECT"
                } else {
                    "WRONG"
                };
                lines.push(format!("   Expected: {expected} -> {verdict}"));
            }
        }
        Err(e) => lines.push(format!("   Parse error ({}): {e}", e.kind())),
    }

    lines.join("\n")
}

/// Classify one query and print the outcome
pub async fn run_single_query(evaluator: &IntentEvaluator, query: &str) -> Result<()> {
    info!("Classifying single query with {}", evaluator.model_name());
    let classification = evaluator
        .classify(query)
        .await
        .context("Completion request failed")?;
    println!(
        "{}",
        render_classification(query, evaluator.config().temperature, &classification)
    );
    Ok(())
}
