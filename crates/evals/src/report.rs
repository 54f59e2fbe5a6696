//! Plain-text rendering of evaluation reports

use crate::evaluator::EvaluationRun;
use crate::failures::analyze_failures;
use crate::metrics::{compute_metrics, group_by_category, group_by_difficulty, GroupStats};
use intenteval_core::EvalResult;

/// Number of false positives / negatives listed in the failure analysis
pub const MAX_LISTED_FAILURES: usize = 10;

const RULE_WIDTH: usize = 50;

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

fn group_line(label: &str, width: usize, stats: &GroupStats) -> String {
    format!(
        "   {label:<width$}: {:>5} ({:2}/{:2})",
        percent(stats.accuracy),
        stats.correct,
        stats.total
    )
}

/// Full report: overall figures, confidence, confusion matrix and breakdowns
pub fn render_report(run: &EvaluationRun) -> String {
    let results = &run.results;
    let metrics = compute_metrics(results);
    let mut lines = Vec::new();

    lines.push("EVALUATION REPORT".to_string());
    lines.push("=".repeat(RULE_WIDTH));

    lines.push(String::new());
    lines.push("OVERALL PERFORMANCE:".to_string());
    lines.push(format!(
        "   Accuracy: {} ({}/{})",
        percent(metrics.accuracy),
        metrics.correct,
        metrics.total_cases
    ));
    lines.push(format!("   Precision: {}", percent(metrics.precision)));
    lines.push(format!("   Recall: {}", percent(metrics.recall)));
    lines.push(format!("   F1 Score: {:.3}", metrics.f1_score));
    if !run.skipped.is_empty() {
        lines.push(format!(
            "   Skipped: {} of {} attempted cases (metrics cover parsed cases only)",
            run.skipped.len(),
            run.attempted
        ));
    }
    if run.interrupted {
        lines.push("   Interrupted: partial results".to_string());
    }

    let conf = &metrics.confidence_stats;
    lines.push(String::new());
    lines.push("CONFIDENCE ANALYSIS:".to_string());
    lines.push(format!("   Mean Confidence: {:.3}", conf.mean_confidence));
    lines.push(format!("   Correct Predictions: {:.3}", conf.mean_correct_confidence));
    lines.push(format!(
        "   Incorrect Predictions: {:.3}",
        conf.mean_incorrect_confidence
    ));
    lines.push(format!("   Confidence Std Dev: {:.3}", conf.confidence_stdev));

    let cm = &metrics.confusion_matrix;
    lines.push(String::new());
    lines.push("CONFUSION MATRIX:".to_string());
    lines.push("                    Predicted".to_string());
    lines.push("                Action    Chat".to_string());
    lines.push(format!(
        "   Actual Action    {:2}      {:2}",
        cm.true_positive, cm.false_negative
    ));
    lines.push(format!(
        "          Chat      {:2}      {:2}",
        cm.false_positive, cm.true_negative
    ));

    // Weakest categories first
    let mut categories: Vec<(String, GroupStats)> = group_by_category(results).into_iter().collect();
    categories.sort_by(|a, b| a.1.accuracy.total_cmp(&b.1.accuracy));

    lines.push(String::new());
    lines.push("PERFORMANCE BY CATEGORY:".to_string());
    for (category, stats) in &categories {
        lines.push(group_line(category, 20, stats));
    }

    lines.push(String::new());
    lines.push("PERFORMANCE BY DIFFICULTY:".to_string());
    for (difficulty, stats) in group_by_difficulty(results) {
        lines.push(group_line(&capitalize(&difficulty.to_string()), 8, &stats));
    }

    lines.join("\n")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn failure_entry(result: &EvalResult) -> [String; 3] {
    [
        format!(
            "   {:?} -> {} (conf: {:.2})",
            result.query, result.predicted, result.confidence
        ),
        format!("      Reasoning: {}", result.reasoning),
        format!(
            "      Category: {}, Notes: {}",
            result.category, result.notes
        ),
    ]
}

/// False positives, false negatives and where failures cluster
pub fn render_failure_analysis(results: &[EvalResult]) -> String {
    let analysis = analyze_failures(results);
    let mut lines = Vec::new();

    lines.push(format!(
        "FAILURE ANALYSIS ({} failures)",
        analysis.total_failures
    ));
    lines.push("=".repeat(60));

    let sections = [
        (
            "FALSE POSITIVES (classified as action, should be chat)",
            &analysis.false_positives,
        ),
        (
            "FALSE NEGATIVES (classified as chat, should be action)",
            &analysis.false_negatives,
        ),
    ];
    for (title, listed) in sections {
        lines.push(String::new());
        lines.push(format!("{title}: {}", listed.len()));
        for result in listed.iter().take(MAX_LISTED_FAILURES) {
            lines.extend(failure_entry(result));
            lines.push(String::new());
        }
    }

    lines.push(String::new());
    lines.push("FAILURE PATTERNS:".to_string());
    for (category, count) in &analysis.by_category {
        lines.push(format!("   {category}: {count} failures"));
    }
    for (difficulty, count) in &analysis.by_difficulty {
        lines.push(format!("   {difficulty} difficulty: {count} failures"));
    }

    lines.join("\n")
}
