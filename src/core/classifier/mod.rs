//! Error-text classifier
//!
//! Decides whether pasted text plausibly is a programming error before any
//! paid analysis is spent on it. Evidence is accumulated over independent
//! pattern categories (see [`Category`]); long prose that merely mentions an
//! error word is damped by the dilution penalty. The same [`ErrorClassifier`]
//! instance serves the pre-check endpoint and the analysis gate.

mod rules;


pub use rules::{Category, RULESET_VERSION};

use crate::config::ClassifierConfig;
use rules::{ERROR_VOCABULARY, RULES};
use serde::Serialize;
use tracing::debug;

/// Word count above which the dilution penalty is considered
const DILUTION_MIN_WORDS: usize = 20;

const TOO_SHORT_REASON: &str = "Error message is too short.";
const TOO_SHORT_SUGGESTION: &str =
    "Paste the complete error message, including the error type and any stack trace.";
const NOT_AN_ERROR_REASON: &str = "This does not look like an error message.";
const NOT_AN_ERROR_SUGGESTION: &str = "Error messages usually contain words like 'Error:', 'Exception:', 'TypeError:', or stack traces.";

/// Outcome of classifying one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// Whether the text is accepted as an error message
    pub valid: bool,
    /// Score after the dilution penalty
    pub score: u32,
    /// Score before the dilution penalty
    pub raw_score: u32,
    /// Matched categories, in rule order
    pub categories: Vec<Category>,
    /// Whether the dilution penalty halved the score
    pub diluted: bool,
    /// Rejection reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// What the user could paste instead
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ClassificationResult {
    fn rejected(reason: &str, suggestion: &str) -> Self {
        Self {
            valid: false,
            score: 0,
            raw_score: 0,
            categories: Vec::new(),
            diluted: false,
            reason: Some(reason.to_string()),
            suggestion: Some(suggestion.to_string()),
        }
    }
}

/// Heuristic error-message classifier
#[derive(Debug, Clone)]
pub struct ErrorClassifier {
    min_length: usize,
    min_score: u32,
    dilution_penalty: bool,
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

impl ErrorClassifier {
    /// Create a classifier with the configured thresholds
    pub fn new(config: &ClassifierConfig) -> Self {
        // Compile the rule set eagerly.
        once_cell::sync::Lazy::force(&RULES);
        Self {
            min_length: config.min_length,
            min_score: config.min_score,
            dilution_penalty: config.dilution_penalty,
        }
    }

    /// Rule set version reported to clients
    pub fn ruleset_version(&self) -> &'static str {
        RULESET_VERSION
    }

    /// Classify `text`. The language hint is only logged.
    pub fn classify(&self, text: Option<&str>, language: Option<&str>) -> ClassificationResult {
        let trimmed = text.map(str::trim).unwrap_or_default();
        if trimmed.chars().count() < self.min_length {
            debug!(language = ?language, "Rejected submission below minimum length");
            return ClassificationResult::rejected(TOO_SHORT_REASON, TOO_SHORT_SUGGESTION);
        }

        let categories: Vec<Category> = RULES
            .iter()
            .filter(|rule| rule.matches(trimmed))
            .map(|rule| rule.category)
            .collect();
        let raw_score: u32 = categories.iter().map(|c| c.weight()).sum();

        let diluted = self.dilution_penalty && is_diluted(trimmed);
        let score = if diluted { raw_score / 2 } else { raw_score };
        let valid = score >= self.min_score;

        debug!(
            language = ?language,
            raw_score,
            score,
            diluted,
            valid,
            "Classified submission"
        );

        let (reason, suggestion) = if valid {
            (None, None)
        } else {
            (
                Some(NOT_AN_ERROR_REASON.to_string()),
                Some(NOT_AN_ERROR_SUGGESTION.to_string()),
            )
        };

        ClassificationResult {
            valid,
            score,
            raw_score,
            categories,
            diluted,
            reason,
            suggestion,
        }
    }

    /// Shorthand for `classify(..).valid`
    pub fn is_valid(&self, text: &str) -> bool {
        self.classify(Some(text), None).valid
    }
}

/// More than 20 words with under 10% of them from the error vocabulary
fn is_diluted(text: &str) -> bool {
    let mut total = 0usize;
    let mut hits = 0usize;

    for word in text
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
    {
        total += 1;
        if ERROR_VOCABULARY
            .iter()
            .any(|vocab| word.eq_ignore_ascii_case(vocab))
        {
            hits += 1;
        }
    }

    total > DILUTION_MIN_WORDS && hits * 10 < total
}
