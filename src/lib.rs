//! # ErrExplain
//!
//! Paste an error message, get a structured plain-English explanation.
//!
//! The service puts two gates in front of a hosted language model:
//!
//! - **Error classifier**: a deterministic, weighted pattern heuristic that
//!   rejects text that does not look like a programming error before any AI
//!   call is spent on it.
//! - **Quota tracker**: a rolling 24-hour window capping analyses at 5 per
//!   client, kept in SQLite/PostgreSQL or Redis with a process-local fallback.
//!
//! Analyzed submissions are stored for the caller's history (with aggregate
//! statistics) and can be published under a share link.
//!
//! ## Running the server
//!
//! ```rust,no_run
//! use errexplain::{Config, server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/errexplain.yaml").await?;
//!     server::run_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Classifying text
//!
//! ```rust
//! use errexplain::core::classifier::ErrorClassifier;
//!
//! let classifier = ErrorClassifier::default();
//! let result = classifier.classify(Some("TypeError: Cannot read properties of undefined"), None);
//! assert!(result.valid);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{ExplainError, Result};

pub use core::analysis::{Analyzer, AnalyzerError, ErrorAnalysis, GroqAnalyzer, Severity};
pub use core::classifier::{ClassificationResult, ErrorClassifier};
pub use core::identity::ClientIdentity;
pub use core::quota::{QuotaDecision, QuotaStatus, QuotaTracker};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (Unix seconds)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: option_env!("BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
            rust_version: option_env!("RUST_VERSION").unwrap_or("unknown"),
        }
    }
}

/// Build information of this binary
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
