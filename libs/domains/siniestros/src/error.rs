use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_catalogos::Catalogo;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum SiniestroError {
    /// Request payload failed its declared rules
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationErrors),

    /// A single field failed a check that spans more than one value
    #[error("{field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    /// Aggregate invariant violated
    #[error("{0}")]
    Validation(String),

    #[error("{catalogo} {id} no existe")]
    InvalidReference { catalogo: Catalogo, id: i32 },

    #[error("Siniestro {0} no encontrado")]
    NotFound(Uuid),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type SiniestroResult<T> = Result<T, SiniestroError>;

impl From<SiniestroError> for AppError {
    fn from(err: SiniestroError) -> Self {
        match err {
            SiniestroError::InvalidInput(errors) => AppError::Validation(errors),
            SiniestroError::InvalidField { field, message } => AppError::field(field, message),
            SiniestroError::Validation(msg) => AppError::BadRequest(msg),
            SiniestroError::InvalidReference { .. } => AppError::BadRequest(err.to_string()),
            SiniestroError::NotFound(_) => AppError::NotFound(err.to_string()),
            SiniestroError::Internal(msg) => {
                AppError::internal_with("Error al procesar el siniestro", msg)
            }
        }
    }
}

impl IntoResponse for SiniestroError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_reference_is_bad_request() {
        let err = SiniestroError::InvalidReference {
            catalogo: Catalogo::TipoSiniestro,
            id: 99,
        };
        match AppError::from(err) {
            AppError::BadRequest(msg) => assert_eq!(msg, "Tipo de siniestro 99 no existe"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let id = Uuid::nil();
        let app: AppError = SiniestroError::NotFound(id).into();
        assert!(matches!(app, AppError::NotFound(_)));
    }

    #[test]
    fn test_invalid_field_becomes_single_field_problem() {
        let app: AppError = SiniestroError::InvalidField {
            field: "fechaFin",
            message: "fuera de rango".into(),
        }
        .into();
        match app {
            AppError::InvalidFields(errors) => {
                assert_eq!(errors["fechaFin"], vec!["fuera de rango".to_string()])
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
