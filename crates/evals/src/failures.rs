//! Failure analysis over evaluation results

use intenteval_core::{EvalResult, IntentLabel};
use std::collections::HashMap;

/// Misclassified results split by error direction, plus where they cluster
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FailureAnalysis<'a> {
    /// Number of results with `correct == false`
    pub total_failures: usize,
    /// Expected chat, predicted action; in result order
    pub false_positives: Vec<&'a EvalResult>,
    /// Expected action, predicted chat; in result order
    pub false_negatives: Vec<&'a EvalResult>,
    /// Failure counts per category, most common first
    pub by_category: Vec<(String, usize)>,
    /// Failure counts per difficulty, most common first
    pub by_difficulty: Vec<(String, usize)>,
}

/// Count occurrences and order them by count descending, then name ascending
fn most_common<I>(keys: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = String>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

pub fn analyze_failures(results: &[EvalResult]) -> FailureAnalysis<'_> {
    let failures: Vec<&EvalResult> = results.iter().filter(|r| !r.correct).collect();

    let false_positives = failures
        .iter()
        .copied()
        .filter(|r| r.expected == IntentLabel::Chat && r.predicted == IntentLabel::Action)
        .collect();
    let false_negatives = failures
        .iter()
        .copied()
        .filter(|r| r.expected == IntentLabel::Action && r.predicted == IntentLabel::Chat)
        .collect();

    FailureAnalysis {
        total_failures: failures.len(),
        false_positives,
        false_negatives,
        by_category: most_common(failures.iter().map(|r| r.category.clone())),
        by_difficulty: most_common(failures.iter().map(|r| r.difficulty.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::test_support::result;
    use intenteval_core::Difficulty::{Easy, Hard, Medium};
    use intenteval_core::IntentLabel::{Action, Chat};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_failures() {
        let results = vec![result(Action, Action, 0.9, "a", Easy)];
        let analysis = analyze_failures(&results);
        assert_eq!(analysis.total_failures, 0);
        assert!(analysis.false_positives.is_empty());
        assert!(analysis.by_category.is_empty());
    }

    #[test]
    fn test_splits_by_direction_in_order() {
        let results = vec![
            result(Chat, Action, 0.6, "meta_search", Hard),
            result(Action, Chat, 0.7, "ambiguous", Hard),
            result(Action, Action, 0.9, "explicit_search", Easy),
            result(Chat, Action, 0.8, "advice_request", Medium),
        ];
        let analysis = analyze_failures(&results);

        assert_eq!(analysis.total_failures, 3);
        let fp: Vec<&str> = analysis
            .false_positives
            .iter()
            .map(|r| r.category.as_str())
            .collect();
        assert_eq!(fp, vec!["meta_search", "advice_request"]);
        assert_eq!(analysis.false_negatives.len(), 1);
        assert_eq!(analysis.false_negatives[0].category, "ambiguous");
    }

    #[test]
    fn test_counts_sorted_most_common_first() {
        let results = vec![
            result(Action, Chat, 0.5, "ambiguous", Hard),
            result(Action, Chat, 0.5, "edge_case", Hard),
            result(Chat, Action, 0.5, "ambiguous", Medium),
            result(Action, Chat, 0.5, "context_dependent", Hard),
        ];
        let analysis = analyze_failures(&results);

        assert_eq!(
            analysis.by_category,
            vec![
                ("ambiguous".to_string(), 2),
                ("context_dependent".to_string(), 1),
                ("edge_case".to_string(), 1),
            ]
        );
        assert_eq!(
            analysis.by_difficulty,
            vec![("hard".to_string(), 3), ("medium".to_string(), 1)]
        );
    }
}
