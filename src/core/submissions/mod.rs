//! Submission records
//!
//! An analyzed submission is persisted for the caller's history and can be
//! published under a share id. Text fields are truncated before storage.

mod stats;

pub use stats::{HistoryStats, SeverityCounts, TimelineDay};

use crate::core::analysis::{ErrorAnalysis, Severity};
use crate::core::identity::ClientIdentity;
use crate::utils::truncate_chars;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored error text limit, in characters
pub const MAX_STORED_ERROR_CHARS: usize = 1000;
/// Stored language limit, in characters
pub const MAX_STORED_LANGUAGE_CHARS: usize = 50;
/// Stored explanation limit, in characters
pub const MAX_STORED_EXPLANATION_CHARS: usize = 2000;

/// One persisted analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub id: String,
    pub client_id: ClientIdentity,
    pub error_message: String,
    pub language: String,
    pub explanation: String,
    pub causes: Vec<String>,
    pub solutions: Vec<String>,
    pub severity: Severity,
    pub category: String,
    pub example_code: Option<String>,
    pub is_private: bool,
    pub is_shared: bool,
    pub share_id: Option<String>,
    pub shared_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl SubmissionRecord {
    /// New record for a fresh analysis, with a generated id
    pub fn from_analysis(
        client_id: ClientIdentity,
        error_message: &str,
        language: &str,
        analysis: &ErrorAnalysis,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            client_id,
            error_message: truncate_chars(error_message, MAX_STORED_ERROR_CHARS),
            language: truncate_chars(language, MAX_STORED_LANGUAGE_CHARS),
            explanation: truncate_chars(&analysis.explanation, MAX_STORED_EXPLANATION_CHARS),
            causes: analysis.causes.clone(),
            solutions: analysis.solutions.clone(),
            severity: analysis.severity,
            category: analysis.category.clone(),
            example_code: analysis.example_code.clone(),
            is_private: false,
            is_shared: false,
            share_id: None,
            shared_at: None,
            created_at,
        }
    }

    /// Whether `client` owns this record
    pub fn is_owned_by(&self, client: &ClientIdentity) -> bool {
        &self.client_id == client
    }

    /// Analysis part of the record
    pub fn analysis(&self) -> ErrorAnalysis {
        ErrorAnalysis {
            explanation: self.explanation.clone(),
            causes: self.causes.clone(),
            solutions: self.solutions.clone(),
            severity: self.severity,
            category: self.category.clone(),
            example_code: self.example_code.clone(),
        }
    }

    /// Owner-facing history entry
    pub fn history_entry(&self) -> HistoryEntry {
        HistoryEntry {
            id: self.id.clone(),
            error_message: self.error_message.clone(),
            language: self.language.clone(),
            category: self.category.clone(),
            severity: self.severity,
            timestamp: self.created_at,
            is_shared: self.is_shared,
            share_id: self.share_id.clone(),
            is_private: self.is_private,
            analysis: self.analysis(),
        }
    }

    /// Public view without the client identity
    pub fn shared_view(&self) -> SharedSubmission {
        SharedSubmission {
            share_id: self.share_id.clone().unwrap_or_default(),
            error_message: self.error_message.clone(),
            language: self.language.clone(),
            analysis: self.analysis(),
            shared_at: self.shared_at,
            created_at: self.created_at,
        }
    }
}

/// History list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub error_message: String,
    pub language: String,
    pub category: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    pub is_shared: bool,
    pub share_id: Option<String>,
    pub is_private: bool,
    pub analysis: ErrorAnalysis,
}

/// Publicly shared submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedSubmission {
    pub share_id: String,
    pub error_message: String,
    pub language: String,
    pub analysis: ErrorAnalysis,
    pub shared_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
