use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// `type` URI of a generic problem body, whatever the status.
pub const PROBLEM_TYPE: &str = "https://tools.ietf.org/html/rfc7231#section-6.6.1";
pub const PROBLEM_TITLE: &str = "An error occurred while processing your request";

/// `type` URI of a validation problem body.
pub const VALIDATION_PROBLEM_TYPE: &str = "https://tools.ietf.org/html/rfc7231#section-6.5.1";
pub const VALIDATION_PROBLEM_TITLE: &str = "One or more validation errors occurred";

/// Error classification attached to every error log line as `error_code`.
///
/// Ranges:
/// - 1000-1999: client errors
/// - 5000-5999: server errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    InvalidUuid,
    InvalidJson,
    InvalidQuery,
    BadRequest,
    NotFound,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUuid => "INVALID_UUID",
            Self::InvalidJson => "INVALID_JSON",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidUuid => 1002,
            Self::InvalidJson => 1003,
            Self::InvalidQuery => 1004,
            Self::BadRequest => 1005,
            Self::NotFound => 1006,
            Self::InternalError => 5001,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::ValidationError
            | Self::InvalidUuid
            | Self::InvalidJson
            | Self::InvalidQuery
            | Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message used when the error carries no detail of its own, and in
    /// place of 5xx details in production.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidUuid => "Invalid UUID format",
            Self::InvalidJson => "Invalid JSON body",
            Self::InvalidQuery => "Invalid query string",
            Self::BadRequest => "Bad request",
            Self::NotFound => "Resource not found",
            Self::InternalError => "An internal server error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
