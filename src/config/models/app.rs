//! Top-level service configuration

use super::*;
use crate::utils::error::{ExplainError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::debug;

/// Complete service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Quota configuration
    #[serde(default)]
    pub quota: QuotaConfig,
    /// Classifier configuration
    #[serde(default)]
    pub classifier: ClassifierConfig,
    /// AI analyzer configuration
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    /// History configuration
    #[serde(default)]
    pub history: HistoryConfig,
    /// Sharing configuration
    #[serde(default)]
    pub sharing: SharingConfig,
}

impl AppConfig {
    /// Build configuration from environment variables on top of defaults
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env()?;

        debug!("Configuration loaded from environment variables");
        Ok(config)
    }

    /// Override fields with any environment variables that are set
    pub fn apply_env(&mut self) -> Result<()> {
        if let Some(host) = non_empty_var("ERREXPLAIN_HOST") {
            self.server.host = host;
        }
        if let Some(port) = non_empty_var("ERREXPLAIN_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| ExplainError::Config(format!("Invalid port: {}", e)))?;
        }
        if let Some(url) = non_empty_var("DATABASE_URL") {
            self.storage.database = Some(DatabaseConfig::with_url(url));
        }
        if let Some(url) = non_empty_var("REDIS_URL") {
            self.storage.redis = Some(RedisConfig::with_url(url));
        }
        if let Some(key) = non_empty_var("GROQ_API_KEY") {
            self.analyzer.api_key = Some(key);
        }
        if let Some(model) = non_empty_var("GROQ_MODEL") {
            self.analyzer.model = model;
        }
        if let Some(base_url) = non_empty_var("ERREXPLAIN_BASE_URL") {
            self.sharing.base_url = base_url;
        }
        if let Some(max) = non_empty_var("QUOTA_MAX_REQUESTS") {
            self.quota.max_requests = max
                .parse()
                .map_err(|e| ExplainError::Config(format!("Invalid QUOTA_MAX_REQUESTS: {}", e)))?;
        }
        Ok(())
    }

    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.storage = self.storage.merge(other.storage);
        self.quota = self.quota.merge(other.quota);
        self.classifier = self.classifier.merge(other.classifier);
        self.analyzer = self.analyzer.merge(other.analyzer);
        self.history = self.history.merge(other.history);
        self.sharing = self.sharing.merge(other.sharing);
        self
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
