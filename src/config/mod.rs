//! Configuration management for ErrExplain
//!
//! This module handles loading, validation, and management of the service configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{ExplainError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Service configuration
    pub app: AppConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ExplainError::Config(format!("Failed to read config file: {}", e)))?;

        let app: AppConfig = serde_yaml::from_str(&content)
            .map_err(|e| ExplainError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { app };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables (and `.env`, if present)
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {:?}", path);
        }

        let config = Self {
            app: AppConfig::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.app.server
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.app.storage
    }

    /// Get quota configuration
    pub fn quota(&self) -> &QuotaConfig {
        &self.app.quota
    }

    /// Get classifier configuration
    pub fn classifier(&self) -> &ClassifierConfig {
        &self.app.classifier
    }

    /// Get analyzer configuration
    pub fn analyzer(&self) -> &AnalyzerConfig {
        &self.app.analyzer
    }

    /// Get history configuration
    pub fn history(&self) -> &HistoryConfig {
        &self.app.history
    }

    /// Get sharing configuration
    pub fn sharing(&self) -> &SharingConfig {
        &self.app.sharing
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.app
            .server
            .validate()
            .map_err(|e| ExplainError::Config(format!("Server config error: {}", e)))?;
        self.app
            .storage
            .validate()
            .map_err(|e| ExplainError::Config(format!("Storage config error: {}", e)))?;
        self.app
            .quota
            .validate()
            .map_err(|e| ExplainError::Config(format!("Quota config error: {}", e)))?;
        self.app
            .classifier
            .validate()
            .map_err(|e| ExplainError::Config(format!("Classifier config error: {}", e)))?;
        self.app
            .analyzer
            .validate()
            .map_err(|e| ExplainError::Config(format!("Analyzer config error: {}", e)))?;
        self.app
            .history
            .validate()
            .map_err(|e| ExplainError::Config(format!("History config error: {}", e)))?;
        self.app
            .sharing
            .validate()
            .map_err(|e| ExplainError::Config(format!("Sharing config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.app = self.app.merge(other.app);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.app)
            .map_err(|e| ExplainError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
