//! Helper functions for creating specific error types

use super::types::ExplainError;

/// Helper functions for creating specific errors
impl ExplainError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_an_error<M: Into<String>, S: Into<String>>(message: M, suggestion: S) -> Self {
        Self::NotAnError {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn analyzer_unavailable<S: Into<String>>(message: S) -> Self {
        Self::AnalyzerUnavailable(message.into())
    }

    pub fn service_unavailable<S: Into<String>>(message: S) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Whether the caller can fix this by changing the request
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::NotAnError { .. }
                | Self::QuotaExceeded { .. }
                | Self::NotFound(_)
                | Self::Forbidden(_)
        )
    }
}
