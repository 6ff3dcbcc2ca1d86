use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

use crate::models::Catalogo;

#[derive(Debug, Error)]
pub enum CatalogoError {
    #[error("{catalogo} {id} no encontrado")]
    NotFound { catalogo: Catalogo, id: i32 },

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CatalogoResult<T> = Result<T, CatalogoError>;

impl From<CatalogoError> for AppError {
    fn from(err: CatalogoError) -> Self {
        match err {
            CatalogoError::NotFound { .. } => AppError::NotFound(err.to_string()),
            CatalogoError::Internal(msg) => {
                AppError::internal_with("Error al consultar catálogos", msg)
            }
        }
    }
}

impl IntoResponse for CatalogoError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
