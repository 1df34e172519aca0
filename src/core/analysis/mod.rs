//! AI error analysis
//!
//! The [`Analyzer`] trait is the seam to the hosted language model. The
//! pipeline only calls it after the classifier and the quota tracker have
//! both admitted the request.

mod groq;
mod prompt;

pub use groq::GroqAnalyzer;
pub use prompt::{SYSTEM_PROMPT, user_prompt};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Category used when the model or a stored record gives none
pub const DEFAULT_CATEGORY: &str = "Runtime Error";

/// How critical an error is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            other => Err(format!("unknown severity: {}", other)),
        }
    }
}

/// Structured explanation produced by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorAnalysis {
    /// Plain-English explanation
    pub explanation: String,
    /// Likely causes
    pub causes: Vec<String>,
    /// Step-by-step fixes
    pub solutions: Vec<String>,
    /// Severity
    pub severity: Severity,
    /// Error category, e.g. "Syntax", "Runtime", "Network"
    pub category: String,
    /// Corrected code sample
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_code: Option<String>,
}

impl ErrorAnalysis {
    /// Check the fields the UI relies on
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if self.explanation.trim().is_empty() {
            return Err(AnalyzerError::MalformedResponse(
                "explanation is empty".to_string(),
            ));
        }
        if self.causes.iter().all(|c| c.trim().is_empty()) {
            return Err(AnalyzerError::MalformedResponse("causes are empty".to_string()));
        }
        if self.solutions.iter().all(|s| s.trim().is_empty()) {
            return Err(AnalyzerError::MalformedResponse(
                "solutions are empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Analyzer failures; all of them make the analysis unavailable
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Analyzer not configured: {0}")]
    NotConfigured(String),

    #[error("Analyzer timed out after {0}s")]
    Timeout(u64),

    #[error("Analyzer returned HTTP {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Malformed analyzer response: {0}")]
    MalformedResponse(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Structured error analysis backend
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Analyze `error_text` written in `language`
    async fn analyze(&self, error_text: &str, language: &str)
    -> Result<ErrorAnalysis, AnalyzerError>;

    /// Backend name for logs and health output
    fn name(&self) -> &'static str;

    /// Whether the backend has what it needs to answer
    fn is_configured(&self) -> bool {
        true
    }
}
