//! Quota configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest accepted rolling window (30 days)
pub const MAX_QUOTA_WINDOW_SECS: u64 = 30 * 24 * 60 * 60;

/// Per-client analysis quota
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Admitted analyses per window
    #[serde(default = "default_quota_max_requests")]
    pub max_requests: u32,
    /// Rolling window length in seconds
    #[serde(default = "default_quota_window_secs")]
    pub window_secs: u64,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            max_requests: default_quota_max_requests(),
            window_secs: default_quota_window_secs(),
        }
    }
}

impl QuotaConfig {
    /// Merge quota configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.max_requests != default_quota_max_requests() {
            self.max_requests = other.max_requests;
        }
        if other.window_secs != default_quota_window_secs() {
            self.window_secs = other.window_secs;
        }
        self
    }

    /// Window length
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// Validate quota configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_requests == 0 {
            return Err("Quota max_requests cannot be 0".to_string());
        }
        if self.window_secs == 0 {
            return Err("Quota window cannot be 0".to_string());
        }
        if self.window_secs > MAX_QUOTA_WINDOW_SECS {
            return Err(format!(
                "Quota window cannot exceed {} seconds",
                MAX_QUOTA_WINDOW_SECS
            ));
        }
        Ok(())
    }
}
