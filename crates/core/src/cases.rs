//! Labeled test cases and their label enumerations

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Intent label assigned to a query
///
/// `Action` is the positive class for precision/recall: the user wants existing
/// discussions found. `Chat` means the user wants a conversational answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IntentLabel {
    Action,
    Chat,
}

impl IntentLabel {
    /// Label derived from a model's `isSearch` flag
    pub fn from_is_search(is_search: bool) -> Self {
        if is_search {
            Self::Action
        } else {
            Self::Chat
        }
    }
}

/// How hard a test case is expected to be for the classifier
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A hand-labeled query with its expected intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub query: String,
    pub expected: IntentLabel,
    /// Free-form tag used for grouping and dataset filtering
    pub category: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub notes: String,
}

impl TestCase {
    pub fn new(
        query: impl Into<String>,
        expected: IntentLabel,
        category: impl Into<String>,
        difficulty: Difficulty,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            query: query.into(),
            expected,
            category: category.into(),
            difficulty,
            notes: notes.into(),
        }
    }

    /// Whether this case belongs to a category containing `filter` as a substring
    pub fn matches_category(&self, filter: &str) -> bool {
        self.category.contains(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_label_from_is_search() {
        assert_eq!(IntentLabel::from_is_search(true), IntentLabel::Action);
        assert_eq!(IntentLabel::from_is_search(false), IntentLabel::Chat);
    }

    #[test]
    fn test_label_string_forms() {
        assert_eq!(IntentLabel::Action.to_string(), "action");
        assert_eq!(IntentLabel::from_str("chat").unwrap(), IntentLabel::Chat);
        assert_eq!(
            serde_json::to_string(&IntentLabel::Action).unwrap(),
            "\"action\""
        );
    }

    #[test]
    fn test_difficulty_order() {
        let order: Vec<Difficulty> = Difficulty::iter().collect();
        assert_eq!(
            order,
            vec![Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
        );
        assert_eq!(Difficulty::Hard.to_string(), "hard");
    }

    #[test]
    fn test_matches_category_is_substring() {
        let case = TestCase::new(
            "find",
            IntentLabel::Action,
            "edge_case",
            Difficulty::Hard,
            "",
        );
        assert!(case.matches_category("edge"));
        assert!(case.matches_category("edge_case"));
        assert!(!case.matches_category("Edge"));
    }

    #[test]
    fn test_case_deserializes_without_notes() {
        let json = r#"{"query": "hi", "expected": "chat", "category": "greeting", "difficulty": "easy"}"#;
        let case: TestCase = serde_json::from_str(json).unwrap();
        assert_eq!(case.notes, "");
        assert_eq!(case.difficulty, Difficulty::Easy);
    }
}
