//! Error types for ErrExplain

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type alias for ErrExplain
pub type Result<T> = std::result::Result<T, ExplainError>;

/// Main error type for ErrExplain
#[derive(Error, Debug)]
pub enum ExplainError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Redis errors
    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Durable store errors surfacing on a primary path
    #[error("Storage error: {0}")]
    Storage(String),

    /// Malformed or incomplete input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Submitted text was rejected by the classifier
    #[error("{message}")]
    NotAnError {
        message: String,
        suggestion: String,
    },

    /// Daily analysis quota exhausted
    #[error("Daily limit reached ({limit} analyses per day)")]
    QuotaExceeded {
        limit: u32,
        remaining: u32,
        reset_time: DateTime<Utc>,
    },

    /// AI service missing, unreachable or answering garbage
    #[error("AI service unavailable: {0}")]
    AnalyzerUnavailable(String),

    /// Optional service not configured
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Forbidden errors
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
