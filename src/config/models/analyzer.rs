//! AI analyzer configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Groq (OpenAI-compatible) analyzer settings
#[derive(Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// API key; `GROQ_API_KEY` is used when absent
    #[serde(default)]
    pub api_key: Option<String>,
    /// API base URL
    #[serde(default = "default_analyzer_api_base")]
    pub api_base: String,
    /// Chat model
    #[serde(default = "default_analyzer_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_analyzer_timeout")]
    pub timeout_secs: u64,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Completion token limit
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl std::fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_analyzer_api_base(),
            model: default_analyzer_model(),
            timeout_secs: default_analyzer_timeout(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl AnalyzerConfig {
    /// Merge analyzer configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.api_base != default_analyzer_api_base() {
            self.api_base = other.api_base;
        }
        if other.model != default_analyzer_model() {
            self.model = other.model;
        }
        if other.timeout_secs != default_analyzer_timeout() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.temperature != default_temperature() {
            self.temperature = other.temperature;
        }
        if other.max_tokens != default_max_tokens() {
            self.max_tokens = other.max_tokens;
        }
        self
    }

    /// Configured key, falling back to `GROQ_API_KEY`
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GROQ_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate analyzer configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("Analyzer timeout cannot be 0".to_string());
        }
        if url::Url::parse(&self.api_base).is_err() {
            return Err(format!("Invalid analyzer api_base: {}", self.api_base));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("Analyzer temperature must be between 0 and 2".to_string());
        }
        Ok(())
    }
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    1500
}
