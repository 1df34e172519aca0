//! Integration tests
//!
//! Tests that exercise several components together, through the public API
//! and through the HTTP surface.

pub mod api_tests;
pub mod config_tests;
pub mod database_tests;
pub mod groq_tests;
pub mod history_share_tests;
pub mod quota_tests;
