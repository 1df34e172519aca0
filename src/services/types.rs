//! Request and response payloads

use crate::core::analysis::ErrorAnalysis;
use crate::core::classifier::Category;
use crate::core::submissions::{HistoryEntry, HistoryStats, SharedSubmission};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `POST /api/classify` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Classifier hint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    pub valid: bool,
    pub score: u32,
    pub categories: Vec<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    pub ruleset_version: String,
}

/// `POST /api/analyze-error` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl AnalyzeRequest {
    pub fn new<M: Into<String>, L: Into<String>>(error_message: M, language: L) -> Self {
        Self {
            error_message: Some(error_message.into()),
            language: Some(language.into()),
        }
    }
}

/// Analysis as returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPayload {
    #[serde(flatten)]
    pub analysis: ErrorAnalysis,
    pub language: String,
    /// Stored submission id; `None` when nothing was persisted
    pub id: Option<String>,
}

/// Quota left after an admitted analysis
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitInfo {
    pub remaining: u32,
    pub reset_time: DateTime<Utc>,
}

/// Successful analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: AnalysisPayload,
    pub rate_limit: RateLimitInfo,
}

/// `GET /api/analyze-status`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaStatusResponse {
    pub remaining: u32,
    pub max_requests: u32,
    pub reset_time: DateTime<Utc>,
    pub can_analyze: bool,
}

/// `GET /api/user-history`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub history: Vec<HistoryEntry>,
    pub stats: HistoryStats,
}

impl HistoryResponse {
    /// History unavailable or empty
    pub fn empty() -> Self {
        Self {
            success: true,
            history: Vec::new(),
            stats: HistoryStats::empty(),
        }
    }
}

/// `POST /api/share-error` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    #[serde(default)]
    pub error_id: Option<String>,
}

/// Share link for a submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub success: bool,
    pub share_id: String,
    pub share_url: String,
}

/// `GET /api/shared-error`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedErrorResponse {
    pub success: bool,
    pub shared: SharedSubmission,
}

/// Bare acknowledgement
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}
