//! Error handling for ErrExplain
//!
//! This module defines the crate-wide error type and its HTTP rendering.

#![allow(missing_docs)]

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{ExplainError, Result};
