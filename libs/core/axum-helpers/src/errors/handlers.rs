use axum::{http::StatusCode, response::Response};

use super::ProblemDetails;

/// Router fallback: unknown routes get a 404 problem body.
pub async fn not_found() -> Response {
    ProblemDetails::new(StatusCode::NOT_FOUND, "The requested resource was not found")
        .into_response_with(StatusCode::NOT_FOUND)
}
