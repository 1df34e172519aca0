//! Quota types

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{QuotaConfig, MAX_QUOTA_WINDOW_SECS};

/// Cap and window applied to every client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaPolicy {
    /// Admitted requests per window
    pub max_requests: u32,
    /// Rolling window length
    pub window: Duration,
}

impl QuotaPolicy {
    /// Create a policy
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }

    /// Window length in milliseconds
    pub fn window_millis(&self) -> i64 {
        self.window.num_milliseconds()
    }
}

impl Default for QuotaPolicy {
    fn default() -> Self {
        Self::from(&QuotaConfig::default())
    }
}

impl From<&QuotaConfig> for QuotaPolicy {
    fn from(config: &QuotaConfig) -> Self {
        let secs = config.window_secs.min(MAX_QUOTA_WINDOW_SECS) as i64;
        Self::new(config.max_requests, Duration::seconds(secs))
    }
}

/// Result of an atomic check-and-reserve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaDecision {
    /// Whether the request was admitted (and recorded)
    pub allowed: bool,
    /// Requests left in the window after this decision
    pub remaining: u32,
    /// Cap
    pub limit: u32,
    /// When the oldest retained request leaves the window
    pub reset_time: DateTime<Utc>,
}

/// Read-only quota view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaStatus {
    /// Requests left in the window
    pub remaining: u32,
    /// Cap
    pub limit: u32,
    /// When the oldest retained request leaves the window
    pub reset_time: DateTime<Utc>,
    /// Whether another analysis would be admitted
    pub can_analyze: bool,
}

impl QuotaStatus {
    /// Status of a client without any retained requests
    pub fn full(policy: &QuotaPolicy, now: DateTime<Utc>) -> Self {
        Self {
            remaining: policy.max_requests,
            limit: policy.max_requests,
            reset_time: now + policy.window,
            can_analyze: true,
        }
    }
}
