//! Labeled datasets for search-intent evaluation
//!
//! The built-in set covers explicit and indirect searches, conversational
//! requests, ambiguous phrasing, malformed input, follow-ups that need context,
//! and questions *about* searching that should not trigger one.

use intenteval_core::error::{Error, Result, ResultExt};
use intenteval_core::{Difficulty, IntentLabel, TestCase};
use std::path::Path;
use tracing::info;

use intenteval_core::Difficulty::{Easy, Hard, Medium};
use intenteval_core::IntentLabel::{Action, Chat};

type CaseRow = (&'static str, IntentLabel, &'static str, Difficulty, &'static str);

#[rustfmt::skip]
const BUILTIN_CASES: &[CaseRow] = &[
    // Clear search intents
    ("find discussions about AI", Action, "explicit_search", Easy, "Classic search command"),
    ("search for startups", Action, "explicit_search", Easy, "Direct search verb"),
    ("look up JavaScript discussions", Action, "explicit_search", Easy, "Look up variant"),
    ("show me posts about machine learning", Action, "explicit_search", Easy, "Show me variant"),
    ("get me some blockchain threads", Action, "explicit_search", Easy, "Get me variant"),
    ("can you find me discussions about React?", Action, "polite_search", Easy, "Polite search request"),
    ("I'm looking for threads on cryptocurrency", Action, "indirect_search", Medium, "Indirect search phrasing"),
    ("any posts about remote work?", Action, "question_search", Medium, "Question form search"),
    ("what's been said about Python lately?", Action, "question_search", Medium, "Recent discussion search"),
    ("where can I find info on web3?", Action, "location_search", Medium, "Where-based search"),

    // Clear conversational intents
    ("hello how are you", Chat, "greeting", Easy, "Simple greeting"),
    ("what's your opinion on React?", Chat, "opinion_request", Medium, "Asking for opinion"),
    ("can you explain machine learning?", Chat, "explanation_request", Medium, "Asking for explanation"),
    ("tell me about startups", Chat, "information_request", Medium, "General info request"),
    ("how does JavaScript work?", Chat, "how_question", Medium, "How question"),
    ("what is blockchain?", Chat, "definition_request", Medium, "Definition question"),
    ("thanks for your help", Chat, "gratitude", Easy, "Thank you message"),
    ("I don't understand", Chat, "confusion", Easy, "Confusion statement"),
    ("that's interesting", Chat, "reaction", Easy, "Reaction to information"),
    ("good morning", Chat, "greeting", Easy, "Time-based greeting"),

    // Ambiguous
    ("what about React?", Action, "ambiguous", Hard, "Could be opinion or search - context dependent"),
    ("thoughts on AI?", Chat, "ambiguous", Hard, "Asking for thoughts/opinions"),
    ("anything on startups?", Action, "ambiguous", Hard, "Implicit search request"),
    ("React?", Action, "ambiguous", Hard, "Single word - likely search"),
    ("tell me what you think about Python", Chat, "ambiguous", Hard, "Opinion request with 'tell me'"),
    ("what's new with cryptocurrency", Action, "ambiguous", Medium, "Could be news search or general question"),
    ("help me understand React", Chat, "ambiguous", Medium, "Help request - explanation vs search"),
    ("I want to know about machine learning", Chat, "ambiguous", Medium, "Want to know - learning intent"),
    ("what's going on with tech layoffs", Action, "ambiguous", Medium, "Current events - likely search"),
    ("give me your take on remote work", Chat, "ambiguous", Medium, "Asking for opinion/perspective"),

    // Edge cases
    ("", Chat, "edge_case", Hard, "Empty query"),
    ("???", Chat, "edge_case", Hard, "Just punctuation"),
    ("find", Action, "edge_case", Hard, "Incomplete search command"),
    ("search", Action, "edge_case", Hard, "Search without topic"),
    ("what", Chat, "edge_case", Hard, "Incomplete question"),
    ("seach for AI", Action, "edge_case", Medium, "Typo in search command"),
    ("finde discussions about React", Action, "edge_case", Medium, "Typo in search verb"),
    ("FIND AI DISCUSSIONS", Action, "edge_case", Medium, "All caps"),
    ("find ai stuff", Action, "edge_case", Medium, "Casual language"),
    ("yo, search for some tech stuff", Action, "edge_case", Medium, "Very casual language"),

    // Context-dependent follow-ups
    ("more on this topic", Action, "context_dependent", Hard, "Needs conversation context"),
    ("what else?", Action, "context_dependent", Hard, "Follow-up question"),
    ("continue", Action, "context_dependent", Hard, "Continuation request"),
    ("next", Action, "context_dependent", Hard, "Next request"),
    ("similar threads", Action, "context_dependent", Hard, "Related content request"),

    // Conversational variations
    ("I'm curious about your thoughts on AI", Chat, "opinion_request", Medium, "Polite opinion request"),
    ("could you walk me through how React works?", Chat, "explanation_request", Medium, "Tutorial request"),
    ("I'd love to learn more about startups", Chat, "learning_intent", Medium, "Learning expression"),
    ("what would you say about machine learning?", Chat, "opinion_request", Medium, "Opinion question variant"),
    ("do you have any insights on blockchain?", Chat, "opinion_request", Medium, "Insights request"),

    // Search variations
    ("any recent threads on AI?", Action, "temporal_search", Medium, "Time-based search"),
    ("popular posts about React?", Action, "quality_search", Medium, "Quality-filtered search"),
    ("controversial discussions on crypto?", Action, "quality_search", Medium, "Controversy search"),
    ("beginner-friendly posts on JavaScript?", Action, "quality_search", Medium, "Level-specific search"),
    ("deep technical discussions on ML?", Action, "quality_search", Medium, "Depth-specific search"),

    // Chat that mentions searching
    ("what do you think I should search for?", Chat, "meta_search", Hard, "Meta-question about searching"),
    ("how do I search effectively?", Chat, "meta_search", Medium, "Question about search process"),
    ("should I look for React tutorials?", Chat, "advice_request", Medium, "Seeking advice about searching"),
    ("is it worth searching for AI discussions?", Chat, "advice_request", Medium, "Value judgment question"),

    // Command variations
    ("retrieve posts about startups", Action, "formal_search", Medium, "Formal search command"),
    ("fetch discussions on blockchain", Action, "formal_search", Medium, "Technical search verb"),
    ("pull up threads about Python", Action, "casual_search", Medium, "Casual search phrasing"),
    ("bring up posts on remote work", Action, "casual_search", Medium, "Bring up variant"),
    ("surface discussions about web3", Action, "formal_search", Medium, "Surface as search verb"),
];

/// The built-in labeled dataset, in its canonical order
pub fn builtin_cases() -> Vec<TestCase> {
    BUILTIN_CASES
        .iter()
        .map(|&(query, expected, category, difficulty, notes)| {
            TestCase::new(query, expected, category, difficulty, notes)
        })
        .collect()
}

/// Keep only cases whose category contains `filter`; `None` keeps everything
///
/// Order is preserved.
pub fn filter_by_category(cases: Vec<TestCase>, filter: Option<&str>) -> Vec<TestCase> {
    match filter {
        Some(filter) => cases
            .into_iter()
            .filter(|case| case.matches_category(filter))
            .collect(),
        None => cases,
    }
}

/// Load a dataset from a JSON array of test case records
pub fn load_cases_from_file(path: &Path) -> Result<Vec<TestCase>> {
    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read dataset {}", path.display()))?;
    let cases: Vec<TestCase> = serde_json::from_str(&content).map_err(|e| {
        Error::invalid_input(format!("Invalid dataset {}: {e}", path.display()))
    })?;

    info!("Loaded {} test cases from {}", cases.len(), path.display());
    Ok(cases)
}
