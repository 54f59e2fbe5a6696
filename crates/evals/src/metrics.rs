//! Classification metrics for search-intent evaluation.
//!
//! Every figure is a pure function of a slice of [`EvalResult`]s; nothing is
//! accumulated across calls.
//!
//! Metrics implemented:
//! - **Accuracy**: fraction of results whose prediction matches the label
//! - **Confusion matrix**: counts with `action` as the positive class
//! - **Precision / Recall / F1** for the `action` class
//! - **Confidence statistics**: means over all, correct and incorrect results,
//!   plus the sample standard deviation
//! - **Grouping** by category and by difficulty

use intenteval_core::{Difficulty, EvalResult, IntentLabel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 2x2 counts of (expected, predicted) with `action` as the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    /// expected action, predicted action
    pub true_positive: usize,
    /// expected chat, predicted action
    pub false_positive: usize,
    /// expected chat, predicted chat
    pub true_negative: usize,
    /// expected action, predicted chat
    pub false_negative: usize,
}

impl ConfusionMatrix {
    /// Sum of all four cells; always equals the number of results counted.
    pub fn total(&self) -> usize {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }
}

/// Summary of model-reported confidence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceStats {
    pub mean_confidence: f64,
    pub mean_correct_confidence: f64,
    pub mean_incorrect_confidence: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub confidence_stdev: f64,
}

/// Computed metrics summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub accuracy: f64,
    /// Number of results the metrics were computed over
    pub total_cases: usize,
    pub correct: usize,
    pub confusion_matrix: ConfusionMatrix,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub confidence_stats: ConfidenceStats,
}

/// Accuracy of one category or difficulty bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub correct: usize,
    pub total: usize,
    pub accuracy: f64,
}

/// `numerator / denominator`, or 0 when the denominator is 0
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

fn mean(values: &[f64]) -> f64 {
    ratio(values.iter().sum(), values.len() as f64)
}

fn sample_stdev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Fraction of correct results; 0 for an empty slice.
pub fn accuracy(results: &[EvalResult]) -> f64 {
    let correct = results.iter().filter(|r| r.correct).count();
    ratio(correct as f64, results.len() as f64)
}

pub fn confusion_matrix(results: &[EvalResult]) -> ConfusionMatrix {
    let mut matrix = ConfusionMatrix::default();
    for result in results {
        match (result.expected, result.predicted) {
            (IntentLabel::Action, IntentLabel::Action) => matrix.true_positive += 1,
            (IntentLabel::Chat, IntentLabel::Action) => matrix.false_positive += 1,
            (IntentLabel::Chat, IntentLabel::Chat) => matrix.true_negative += 1,
            (IntentLabel::Action, IntentLabel::Chat) => matrix.false_negative += 1,
        }
    }
    matrix
}

/// Precision, recall and F1 for the `action` class.
///
/// Each is 0 when its denominator is 0.
pub fn precision_recall_f1(matrix: &ConfusionMatrix) -> (f64, f64, f64) {
    let tp = matrix.true_positive as f64;
    let precision = ratio(tp, tp + matrix.false_positive as f64);
    let recall = ratio(tp, tp + matrix.false_negative as f64);
    let f1 = ratio(2.0 * precision * recall, precision + recall);
    (precision, recall, f1)
}

pub fn confidence_stats(results: &[EvalResult]) -> ConfidenceStats {
    let all: Vec<f64> = results.iter().map(|r| r.confidence).collect();
    let correct: Vec<f64> = results
        .iter()
        .filter(|r| r.correct)
        .map(|r| r.confidence)
        .collect();
    let incorrect: Vec<f64> = results
        .iter()
        .filter(|r| !r.correct)
        .map(|r| r.confidence)
        .collect();

    ConfidenceStats {
        mean_confidence: mean(&all),
        mean_correct_confidence: mean(&correct),
        mean_incorrect_confidence: mean(&incorrect),
        confidence_stdev: sample_stdev(&all),
    }
}

/// Compute all standard metrics and return as a struct.
pub fn compute_metrics(results: &[EvalResult]) -> AggregateMetrics {
    let matrix = confusion_matrix(results);
    let (precision, recall, f1_score) = precision_recall_f1(&matrix);

    AggregateMetrics {
        accuracy: accuracy(results),
        total_cases: results.len(),
        correct: results.iter().filter(|r| r.correct).count(),
        confusion_matrix: matrix,
        precision,
        recall,
        f1_score,
        confidence_stats: confidence_stats(results),
    }
}

fn group_by<K, F>(results: &[EvalResult], key: F) -> BTreeMap<K, GroupStats>
where
    K: Ord,
    F: Fn(&EvalResult) -> K,
{
    let mut groups: BTreeMap<K, GroupStats> = BTreeMap::new();
    for result in results {
        let stats = groups.entry(key(result)).or_default();
        stats.total += 1;
        if result.correct {
            stats.correct += 1;
        }
    }
    for stats in groups.values_mut() {
        stats.accuracy = ratio(stats.correct as f64, stats.total as f64);
    }
    groups
}

/// Per-category accuracy, keyed by category name.
pub fn group_by_category(results: &[EvalResult]) -> BTreeMap<String, GroupStats> {
    group_by(results, |r| r.category.clone())
}

/// Per-difficulty accuracy; iteration order is easy, medium, hard.
pub fn group_by_difficulty(results: &[EvalResult]) -> BTreeMap<Difficulty, GroupStats> {
    group_by(results, |r| r.difficulty)
}
