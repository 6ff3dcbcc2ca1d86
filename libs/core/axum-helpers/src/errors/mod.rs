//! HTTP error model.
//!
//! Every failure leaves the service as an RFC 7807 style problem body:
//!
//! ```json
//! {
//!   "type": "https://tools.ietf.org/html/rfc7231#section-6.6.1",
//!   "title": "An error occurred while processing your request",
//!   "status": 404,
//!   "detail": "Siniestro 0191... no encontrado"
//! }
//! ```
//!
//! Validation failures use the validation problem shape, with an `errors`
//! map of field path → messages instead of `detail`.

pub mod codes;
pub mod handlers;
pub mod responses;
pub mod validation;

pub use codes::ErrorCode;
pub use validation::FieldErrors;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use core_config::Environment;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_uri: String,
    pub title: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Field path → messages; only present on validation problems
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl ProblemDetails {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            type_uri: codes::PROBLEM_TYPE.to_string(),
            title: codes::PROBLEM_TITLE.to_string(),
            status: status.as_u16(),
            detail: Some(detail.into()),
            errors: None,
        }
    }

    pub fn validation(errors: FieldErrors) -> Self {
        Self {
            type_uri: codes::VALIDATION_PROBLEM_TYPE.to_string(),
            title: codes::VALIDATION_PROBLEM_TITLE.to_string(),
            status: StatusCode::BAD_REQUEST.as_u16(),
            detail: None,
            errors: Some(errors),
        }
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        (
            status,
            [(header::CONTENT_TYPE, PROBLEM_CONTENT_TYPE)],
            Json(self),
        )
            .into_response()
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// Already-flattened field errors, for checks that `validator` cannot express
    #[error("Validation error: {0:?}")]
    InvalidFields(FieldErrors),

    #[error("JSON extraction error: {0}")]
    JsonRejection(#[from] JsonRejection),

    #[error("Query string error: {0}")]
    QueryRejection(#[from] QueryRejection),

    #[error("Path error: {0}")]
    PathRejection(#[from] PathRejection),

    #[error("Invalid UUID: {0}")]
    InvalidUuid(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {message}")]
    Internal {
        message: String,
        inner: Option<String>,
    },
}

impl AppError {
    /// Single-field validation problem.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.into(), vec![message.into()]);
        AppError::InvalidFields(errors)
    }

    pub fn internal_with(message: impl Into<String>, inner: impl std::fmt::Display) -> Self {
        AppError::Internal {
            message: message.into(),
            inner: Some(inner.to_string()),
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) | AppError::InvalidFields(_) => ErrorCode::ValidationError,
            AppError::JsonRejection(_) => ErrorCode::InvalidJson,
            AppError::QueryRejection(_) => ErrorCode::InvalidQuery,
            AppError::PathRejection(_) | AppError::BadRequest(_) => ErrorCode::BadRequest,
            AppError::InvalidUuid(_) => ErrorCode::InvalidUuid,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Internal { .. } => ErrorCode::InternalError,
        }
    }

    fn to_problem(&self) -> (StatusCode, ProblemDetails) {
        let code = self.error_code();
        match self {
            AppError::Validation(errors) => {
                (code.status(), ProblemDetails::validation(validation::flatten(errors)))
            }
            AppError::InvalidFields(errors) => {
                (code.status(), ProblemDetails::validation(errors.clone()))
            }
            AppError::InvalidUuid(raw) => {
                let mut errors = FieldErrors::new();
                errors.insert(
                    "id".to_string(),
                    vec![format!("El valor '{raw}' no es un identificador válido")],
                );
                (code.status(), ProblemDetails::validation(errors))
            }
            AppError::JsonRejection(rejection) => {
                // Missing content type keeps its 415; malformed bodies are a plain 400.
                let status = match rejection {
                    JsonRejection::MissingJsonContentType(_) => rejection.status(),
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, ProblemDetails::new(status, rejection.body_text()))
            }
            AppError::QueryRejection(rejection) => (
                code.status(),
                ProblemDetails::new(code.status(), rejection.body_text()),
            ),
            AppError::PathRejection(rejection) => (
                code.status(),
                ProblemDetails::new(code.status(), rejection.body_text()),
            ),
            AppError::BadRequest(msg) | AppError::NotFound(msg) => {
                (code.status(), ProblemDetails::new(code.status(), msg.clone()))
            }
            AppError::Internal { message, inner } => {
                let detail = server_detail(code, message, inner.as_deref());
                (code.status(), ProblemDetails::new(code.status(), detail))
            }
        }
    }
}

/// `"message | Inner: cause"`, or the generic message in production.
fn server_detail(code: ErrorCode, message: &str, inner: Option<&str>) -> String {
    if Environment::from_env().is_production() {
        return code.default_message().to_string();
    }
    match inner {
        Some(inner) => format!("{message} | Inner: {inner}"),
        None => message.to_string(),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.error_code();
        let (status, problem) = self.to_problem();

        if status.is_server_error() {
            tracing::error!(error_code = code.code(), error = %self, "request failed");
        } else {
            tracing::warn!(
                error_code = code.code(),
                status = status.as_u16(),
                error = %self,
                "request rejected"
            );
        }

        problem.into_response_with(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn problem_of(err: AppError) -> (StatusCode, ProblemDetails) {
        let response = err.into_response();
        let status = response.status();
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            PROBLEM_CONTENT_TYPE
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_problem_shape() {
        let (status, problem) = problem_of(AppError::NotFound("no existe".into())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(problem.status, 404);
        assert_eq!(problem.type_uri, codes::PROBLEM_TYPE);
        assert_eq!(problem.title, codes::PROBLEM_TITLE);
        assert_eq!(problem.detail.as_deref(), Some("no existe"));
        assert!(problem.errors.is_none());
    }

    #[tokio::test]
    async fn test_field_error_is_validation_problem() {
        let (status, problem) =
            problem_of(AppError::field("fechaFin", "rango inválido")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(problem.type_uri, codes::VALIDATION_PROBLEM_TYPE);
        assert_eq!(problem.title, codes::VALIDATION_PROBLEM_TITLE);
        assert_eq!(
            problem.errors.unwrap()["fechaFin"],
            vec!["rango inválido".to_string()]
        );
    }

    #[tokio::test]
    async fn test_internal_error_appends_inner_outside_production() {
        temp_env::async_with_vars([("APP_ENV", None::<&str>)], async {
            let (status, problem) =
                problem_of(AppError::internal_with("fallo al guardar", "conexión cerrada")).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                problem.detail.as_deref(),
                Some("fallo al guardar | Inner: conexión cerrada")
            );
        })
        .await;
    }

    #[tokio::test]
    async fn test_internal_error_hides_inner_in_production() {
        temp_env::async_with_vars([("APP_ENV", Some("production"))], async {
            let (_, problem) =
                problem_of(AppError::internal_with("fallo al guardar", "password=secreto")).await;

            assert_eq!(
                problem.detail.as_deref(),
                Some(ErrorCode::InternalError.default_message())
            );
        })
        .await;
    }

    #[tokio::test]
    async fn test_invalid_uuid_reports_id_field() {
        let (status, problem) = problem_of(AppError::InvalidUuid("abc".into())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(problem.errors.unwrap().contains_key("id"));
    }
}
