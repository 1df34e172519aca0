//! HTTP response handling for errors

use super::types::ExplainError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use tracing::error;

impl ExplainError {
    /// Status code, machine-readable code and caller-facing message
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ExplainError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            ExplainError::NotAnError { message, .. } => {
                (StatusCode::BAD_REQUEST, "NOT_AN_ERROR_MESSAGE", message.clone())
            }
            ExplainError::QuotaExceeded { .. } => (
                StatusCode::TOO_MANY_REQUESTS,
                "QUOTA_EXCEEDED",
                self.to_string(),
            ),
            ExplainError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            ExplainError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            ExplainError::AnalyzerUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "AI_SERVICE_UNAVAILABLE",
                "AI service temporarily unavailable. Please try again in a moment.".to_string(),
            ),
            ExplainError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                msg.clone(),
            ),
            ExplainError::Timeout(_) => (
                StatusCode::GATEWAY_TIMEOUT,
                "TIMEOUT",
                "The request timed out".to_string(),
            ),
            ExplainError::Database(_) | ExplainError::Storage(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
                "Storage operation failed".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        }
    }
}

impl ResponseError for ExplainError {
    fn status_code(&self) -> StatusCode {
        self.parts().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, code, message) = self.parts();

        if status_code.is_server_error() {
            error!(code, error = %self, "Request failed");
        }

        let mut detail = ErrorDetail {
            code: code.to_string(),
            message,
            timestamp: Utc::now().timestamp(),
            request_id: None,
            suggestion: None,
            remaining: None,
            reset_time: None,
        };

        match self {
            ExplainError::NotAnError { suggestion, .. } => {
                detail.suggestion = Some(suggestion.clone());
            }
            ExplainError::QuotaExceeded {
                remaining,
                reset_time,
                ..
            } => {
                detail.remaining = Some(*remaining);
                detail.reset_time = Some(*reset_time);
            }
            _ => {}
        }

        HttpResponse::build(status_code).json(ErrorResponse {
            success: false,
            error: detail,
        })
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_time: Option<DateTime<Utc>>,
}
