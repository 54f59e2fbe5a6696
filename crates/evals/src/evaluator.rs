//! Sequential evaluation of test cases against a completion provider
//!
//! Each case is rendered into the prompt, sent to the provider, parsed and
//! scored before the next one starts. Cases that produce no usable response
//! are kept aside as [`SkippedCase`]s rather than counted as wrong.

use crate::dataset::filter_by_category;
use crate::parser::{parse_response, ParsedPrediction, ResponseParseError};
use crate::prompts::PromptTemplate;
use intenteval_core::config::EvaluationConfig;
use intenteval_core::{Difficulty, EvalResult, TestCase};
use intenteval_inference::{CompletionProvider, InferenceError};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Settings for a single evaluation pass
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatorConfig {
    /// Passed to the provider unchanged
    pub temperature: f32,
    /// Substring matched against each case's category
    pub dataset_filter: Option<String>,
    /// Log per-case diagnostics at INFO instead of DEBUG
    pub verbose: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        EvaluationConfig::default().into()
    }
}

impl From<&EvaluationConfig> for EvaluatorConfig {
    fn from(config: &EvaluationConfig) -> Self {
        Self {
            temperature: config.temperature,
            dataset_filter: config.dataset_filter.clone(),
            verbose: config.verbose,
        }
    }
}

impl From<EvaluationConfig> for EvaluatorConfig {
    fn from(config: EvaluationConfig) -> Self {
        Self::from(&config)
    }
}

/// Why a case produced no result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// The provider could not be reached or returned no usable completion
    Inference(String),
    /// The completion could not be parsed into a prediction
    Unparseable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inference(msg) => write!(f, "inference failed: {msg}"),
            Self::Unparseable(msg) => write!(f, "unparseable response: {msg}"),
        }
    }
}

impl From<&InferenceError> for SkipReason {
    fn from(err: &InferenceError) -> Self {
        Self::Inference(err.to_string())
    }
}

impl From<&ResponseParseError> for SkipReason {
    fn from(err: &ResponseParseError) -> Self {
        Self::Unparseable(err.to_string())
    }
}

/// A test case dropped from scoring
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedCase {
    pub query: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub reason: SkipReason,
    /// Raw completion when the provider answered but parsing failed
    pub raw_response: Option<String>,
}

impl SkippedCase {
    fn new(case: &TestCase, reason: SkipReason, raw_response: Option<String>) -> Self {
        Self {
            query: case.query.clone(),
            category: case.category.clone(),
            difficulty: case.difficulty,
            reason,
            raw_response,
        }
    }
}

/// Result of evaluating one case
#[derive(Debug, Clone, PartialEq)]
pub enum CaseOutcome {
    Scored(EvalResult),
    Skipped(SkippedCase),
}

/// Progress events emitted during evaluation
#[derive(Debug, Clone, Copy)]
pub enum EvalProgress<'a> {
    /// Cases filtered, evaluation starting
    Started {
        /// Number of cases that will be attempted
        total: usize,
    },
    /// One case finished (scored or skipped)
    CaseCompleted {
        /// 1-based position of the case
        index: usize,
        total: usize,
        case: &'a TestCase,
        outcome: &'a CaseOutcome,
    },
}

/// Output of one evaluation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationRun {
    /// Scored cases, in dataset order
    pub results: Vec<EvalResult>,
    pub skipped: Vec<SkippedCase>,
    /// Cases that reached a final outcome
    pub attempted: usize,
    /// Set when cancellation stopped the loop early
    pub interrupted: bool,
}

/// Raw completion plus its parse outcome for a single query
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub prompt: String,
    pub raw_response: String,
    pub prediction: Result<ParsedPrediction, ResponseParseError>,
}

/// Runs test cases through a provider and scores the predictions
pub struct IntentEvaluator {
    provider: Arc<dyn CompletionProvider>,
    prompt: PromptTemplate,
    config: EvaluatorConfig,
}

impl IntentEvaluator {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        prompt: PromptTemplate,
        config: EvaluatorConfig,
    ) -> Self {
        Self {
            provider,
            prompt,
            config,
        }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    /// Classify one query without scoring it
    pub async fn classify(&self, query: &str) -> Result<Classification, InferenceError> {
        let prompt = self.prompt.render(query);
        let raw_response = self
            .provider
            .complete(&prompt, self.config.temperature)
            .await?;
        let prediction = parse_response(&raw_response);
        Ok(Classification {
            prompt,
            raw_response,
            prediction,
        })
    }

    /// Evaluate a single case; never fails, failures become skips
    pub async fn evaluate_case(&self, case: &TestCase) -> CaseOutcome {
        let classification = match self.classify(&case.query).await {
            Ok(classification) => classification,
            Err(e) => {
                warn!("Inference failed for {:?}: {e}", case.query);
                return CaseOutcome::Skipped(SkippedCase::new(case, SkipReason::from(&e), None));
            }
        };

        match classification.prediction {
            Ok(prediction) => CaseOutcome::Scored(EvalResult::new(
                case,
                prediction.intent_category,
                prediction.confidence,
                prediction.reasoning,
                classification.raw_response,
            )),
            Err(e) => CaseOutcome::Skipped(SkippedCase::new(
                case,
                SkipReason::from(&e),
                Some(classification.raw_response),
            )),
        }
    }

    /// Evaluate `cases` after applying the configured category filter
    pub async fn run(&self, cases: Vec<TestCase>, cancel: &CancellationToken) -> EvaluationRun {
        self.run_with_progress(cases, cancel, |_| {}).await
    }

    /// Like [`run`](Self::run), reporting progress through `on_progress`
    ///
    /// Cancellation is checked before each case and raced against the
    /// in-flight provider call. An interrupted run keeps everything gathered
    /// so far; the case in flight at the time is dropped.
    pub async fn run_with_progress<F>(
        &self,
        cases: Vec<TestCase>,
        cancel: &CancellationToken,
        mut on_progress: F,
    ) -> EvaluationRun
    where
        F: FnMut(EvalProgress<'_>),
    {
        let filter = self.config.dataset_filter.as_deref();
        let cases = filter_by_category(cases, filter);
        let total = cases.len();

        match filter {
            Some(filter) => info!("Running evaluation on {total} test cases (filter: {filter})"),
            None => info!("Running full evaluation on {total} test cases"),
        }
        on_progress(EvalProgress::Started { total });

        let mut run = EvaluationRun::default();

        for (i, case) in cases.iter().enumerate() {
            if cancel.is_cancelled() {
                run.interrupted = true;
                break;
            }

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    run.interrupted = true;
                    break;
                }
                outcome = self.evaluate_case(case) => outcome,
            };

            run.attempted += 1;
            self.log_outcome(i + 1, total, case, &outcome);
            on_progress(EvalProgress::CaseCompleted {
                index: i + 1,
                total,
                case,
                outcome: &outcome,
            });

            match outcome {
                CaseOutcome::Scored(result) => run.results.push(result),
                CaseOutcome::Skipped(skipped) => run.skipped.push(skipped),
            }
        }

        if run.interrupted {
            warn!(
                "Evaluation interrupted after {}/{total} cases",
                run.attempted
            );
        } else {
            info!(
                "Evaluation complete: {} scored, {} skipped",
                run.results.len(),
                run.skipped.len()
            );
        }

        run
    }

    fn log_outcome(&self, index: usize, total: usize, case: &TestCase, outcome: &CaseOutcome) {
        let message = match outcome {
            CaseOutcome::Scored(result) => format!(
                "[{index}/{total}] {:?} ({}, {}): predicted {} (confidence {:.2}) {}",
                case.query,
                case.category,
                case.difficulty,
                result.predicted,
                result.confidence,
                if result.correct { "CORRECT" } else { "WRONG" }
            ),
            CaseOutcome::Skipped(skipped) => format!(
                "[{index}/{total}] {:?} ({}, {}): skipped, {}",
                case.query, case.category, case.difficulty, skipped.reason
            ),
        };

        if self.config.verbose {
            info!("{message}");
        } else {
            debug!("{message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intenteval_core::{Difficulty, IntentLabel};
    use intenteval_inference::MockCompletionProvider;

    const SEARCH: &str = r#"{"isSearch": true, "searchQuery": "AI", "confidence": 0.9, "reasoning": "search verb"}"#;
    const CHAT: &str = r#"{"isSearch": false, "searchQuery": null, "confidence": 0.8, "reasoning": "greeting"}"#;

    fn cases() -> Vec<TestCase> {
        vec![
            TestCase::new(
                "find discussions about AI",
                IntentLabel::Action,
                "explicit_search",
                Difficulty::Easy,
                "",
            ),
            TestCase::new("hello", IntentLabel::Chat, "greeting", Difficulty::Easy, ""),
            TestCase::new("React?", IntentLabel::Action, "ambiguous", Difficulty::Hard, ""),
        ]
    }

    fn evaluator(mock: Arc<MockCompletionProvider>, config: EvaluatorConfig) -> IntentEvaluator {
        let prompt = PromptTemplate::new("Classify: {message}").unwrap();
        IntentEvaluator::new(mock, prompt, config)
    }

    #[tokio::test]
    async fn test_scores_parsed_cases() {
        let mock = Arc::new(MockCompletionProvider::with_script(
            "m".to_string(),
            vec![Some(SEARCH), Some(CHAT), Some(CHAT)],
        ));
        let evaluator = evaluator(mock, EvaluatorConfig::default());

        let run = evaluator.run(cases(), &CancellationToken::new()).await;
        assert_eq!(run.attempted, 3);
        assert_eq!(run.results.len(), 3);
        assert!(run.results[0].correct);
        assert!(run.results[1].correct);
        assert!(!run.results[2].correct);
        assert!(!run.interrupted);
    }

    #[tokio::test]
    async fn test_unparseable_and_unavailable_are_skipped() {
        let mock = Arc::new(MockCompletionProvider::with_script(
            "m".to_string(),
            vec![Some("I refuse to answer in JSON"), None, Some(CHAT)],
        ));
        let evaluator = evaluator(mock, EvaluatorConfig::default());

        let run = evaluator.run(cases(), &CancellationToken::new()).await;
        assert_eq!(run.attempted, 3);
        assert_eq!(run.results.len(), 1);
        assert_eq!(run.skipped.len(), 2);

        assert!(matches!(run.skipped[0].reason, SkipReason::Unparseable(_)));
        assert_eq!(
            run.skipped[0].raw_response.as_deref(),
            Some("I refuse to answer in JSON")
        );
        assert!(matches!(run.skipped[1].reason, SkipReason::Inference(_)));
        assert!(run.skipped[1].raw_response.is_none());
    }

    #[tokio::test]
    async fn test_prompt_and_temperature_reach_provider() {
        let mock = Arc::new(MockCompletionProvider::new("m".to_string()));
        let config = EvaluatorConfig {
            temperature: 0.35,
            ..Default::default()
        };
        let evaluator = evaluator(mock.clone(), config);

        evaluator.run(cases(), &CancellationToken::new()).await;

        let calls = mock.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].0, "Classify: find discussions about AI");
        assert!(calls.iter().all(|(_, t)| (*t - 0.35).abs() < f32::EPSILON));
    }

    #[tokio::test]
    async fn test_filter_applied_before_evaluation() {
        let mock = Arc::new(MockCompletionProvider::new("m".to_string()));
        let config = EvaluatorConfig {
            dataset_filter: Some("search".to_string()),
            ..Default::default()
        };
        let evaluator = evaluator(mock.clone(), config);

        let mut totals = Vec::new();
        let run = evaluator
            .run_with_progress(cases(), &CancellationToken::new(), |event| {
                if let EvalProgress::Started { total } = event {
                    totals.push(total);
                }
            })
            .await;

        assert_eq!(totals, vec![1]);
        assert_eq!(run.attempted, 1);
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let mock = Arc::new(MockCompletionProvider::new("m".to_string()));
        let evaluator = evaluator(mock.clone(), EvaluatorConfig::default());

        let cancel = CancellationToken::new();
        cancel.cancel();
        let run = evaluator.run(cases(), &cancel).await;

        assert!(run.interrupted);
        assert_eq!(run.attempted, 0);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_mid_run_keeps_partial_results() {
        let mock = Arc::new(MockCompletionProvider::new("m".to_string()));
        let evaluator = evaluator(mock, EvaluatorConfig::default());

        let cancel = CancellationToken::new();
        let run = evaluator
            .run_with_progress(cases(), &cancel, |event| {
                if let EvalProgress::CaseCompleted { index: 1, .. } = event {
                    cancel.cancel();
                }
            })
            .await;

        assert!(run.interrupted);
        assert_eq!(run.attempted, 1);
        assert_eq!(run.results.len(), 1);
    }

    #[tokio::test]
    async fn test_classify_returns_raw_and_parse() {
        let mock = Arc::new(MockCompletionProvider::with_script(
            "m".to_string(),
            vec![Some(format!("Answer: {SEARCH}"))],
        ));
        let evaluator = evaluator(mock, EvaluatorConfig::default());

        let classification = evaluator.classify("find AI").await.unwrap();
        assert_eq!(classification.prompt, "Classify: find AI");
        assert!(classification.raw_response.starts_with("Answer:"));
        let prediction = classification.prediction.unwrap();
        assert_eq!(prediction.intent_category, IntentLabel::Action);
        assert_eq!(prediction.search_query.as_deref(), Some("AI"));
    }

    #[tokio::test]
    async fn test_classify_surfaces_unavailable() {
        let mock = Arc::new(MockCompletionProvider::with_script(
            "m".to_string(),
            vec![None::<String>],
        ));
        let evaluator = evaluator(mock, EvaluatorConfig::default());
        assert!(evaluator.classify("x").await.unwrap_err().is_unavailable());
    }
}
