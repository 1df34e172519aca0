//! History and sharing configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Maximum history page size
pub const MAX_HISTORY_PAGE_SIZE: u64 = 100;

/// Submission history settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Entries returned per history request
    #[serde(default = "default_history_page_size")]
    pub page_size: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            page_size: default_history_page_size(),
        }
    }
}

impl HistoryConfig {
    /// Merge history configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.page_size != default_history_page_size() {
            self.page_size = other.page_size;
        }
        self
    }

    /// Validate history configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.page_size == 0 || self.page_size > MAX_HISTORY_PAGE_SIZE {
            return Err(format!(
                "History page_size must be between 1 and {}",
                MAX_HISTORY_PAGE_SIZE
            ));
        }
        Ok(())
    }
}

/// Share link settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharingConfig {
    /// Public base URL used to build share links
    #[serde(default = "default_share_base_url")]
    pub base_url: String,
}

impl Default for SharingConfig {
    fn default() -> Self {
        Self {
            base_url: default_share_base_url(),
        }
    }
}

impl SharingConfig {
    /// Merge sharing configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.base_url != default_share_base_url() {
            self.base_url = other.base_url;
        }
        self
    }

    /// Public URL for a share id
    pub fn share_url(&self, share_id: &str) -> String {
        format!("{}/shared/{}", self.base_url.trim_end_matches('/'), share_id)
    }

    /// Validate sharing configuration
    pub fn validate(&self) -> Result<(), String> {
        url::Url::parse(&self.base_url)
            .map(|_| ())
            .map_err(|e| format!("Invalid sharing base_url {}: {}", self.base_url, e))
    }
}
