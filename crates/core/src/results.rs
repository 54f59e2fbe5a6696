//! Per-case evaluation results

use crate::cases::{Difficulty, IntentLabel, TestCase};
use serde::{Deserialize, Serialize};

/// Outcome of scoring one successfully parsed model response against its test case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalResult {
    pub query: String,
    pub expected: IntentLabel,
    pub predicted: IntentLabel,
    /// Model-reported confidence in [0, 1]
    pub confidence: f64,
    pub reasoning: String,
    pub raw_response: String,
    pub correct: bool,
    pub category: String,
    pub difficulty: Difficulty,
    pub notes: String,
}

impl EvalResult {
    /// Build a result for `case`; `correct` is derived, never supplied
    pub fn new(
        case: &TestCase,
        predicted: IntentLabel,
        confidence: f64,
        reasoning: impl Into<String>,
        raw_response: impl Into<String>,
    ) -> Self {
        Self {
            query: case.query.clone(),
            expected: case.expected,
            predicted,
            confidence,
            reasoning: reasoning.into(),
            raw_response: raw_response.into(),
            correct: predicted == case.expected,
            category: case.category.clone(),
            difficulty: case.difficulty,
            notes: case.notes.clone(),
        }
    }
}
