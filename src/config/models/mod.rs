//! Configuration data models
//!
//! This module defines all configuration structures used by the service.

pub mod analyzer;
pub mod app;
pub mod classifier;
pub mod features;
pub mod quota;
pub mod server;
pub mod storage;

// Re-export all configuration types
pub use analyzer::*;
pub use app::*;
pub use classifier::*;
pub use features::*;
pub use quota::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    64 * 1024 // 64KB
}

pub fn default_max_connections() -> u32 {
    10
}

pub fn default_connection_timeout() -> u64 {
    5
}

/// Daily analysis cap per client
pub fn default_quota_max_requests() -> u32 {
    5
}

/// Rolling window length in seconds
pub fn default_quota_window_secs() -> u64 {
    86_400 // 24 hours
}

pub fn default_min_length() -> usize {
    8
}

pub fn default_min_score() -> u32 {
    2
}

pub fn default_max_length() -> usize {
    2000
}

pub fn default_analyzer_api_base() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

pub fn default_analyzer_model() -> String {
    "meta-llama/llama-4-maverick-17b-128e-instruct".to_string()
}

pub fn default_analyzer_timeout() -> u64 {
    30
}

pub fn default_share_base_url() -> String {
    "http://localhost:3000".to_string()
}

pub fn default_history_page_size() -> u64 {
    50
}
