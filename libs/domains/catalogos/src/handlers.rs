use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::{
    ValidatedQuery,
    errors::responses::{InternalServerErrorResponse, ValidationProblemResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogoResult;
use crate::models::{CiudadDto, CiudadFilter, DepartamentoDto, TipoSiniestroDto};
use crate::repository::CatalogoRepository;
use crate::service::CatalogoService;

pub const TAG: &str = "catalogos";

/// OpenAPI documentation for the lookup endpoints
#[derive(OpenApi)]
#[openapi(
    paths(tipos_siniestro, departamentos, ciudades),
    components(
        schemas(TipoSiniestroDto, DepartamentoDto, CiudadDto),
        responses(ValidationProblemResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "Reference data: incident types, departments and cities")
    )
)]
pub struct ApiDoc;

/// Lookup router, mounted under `/catalogos`
pub fn router<R: CatalogoRepository + 'static>(service: CatalogoService<R>) -> Router {
    Router::new()
        .route("/tipos-siniestro", get(tipos_siniestro))
        .route("/departamentos", get(departamentos))
        .route("/ciudades", get(ciudades))
        .with_state(Arc::new(service))
}

/// Active incident types
#[utoipa::path(
    get,
    path = "/tipos-siniestro",
    tag = TAG,
    responses(
        (status = 200, description = "Active incident types", body = Vec<TipoSiniestroDto>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn tipos_siniestro<R: CatalogoRepository>(
    State(service): State<Arc<CatalogoService<R>>>,
) -> CatalogoResult<Json<Vec<TipoSiniestroDto>>> {
    Ok(Json(service.tipos_siniestro().await?))
}

/// Active departments
#[utoipa::path(
    get,
    path = "/departamentos",
    tag = TAG,
    responses(
        (status = 200, description = "Active departments", body = Vec<DepartamentoDto>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn departamentos<R: CatalogoRepository>(
    State(service): State<Arc<CatalogoService<R>>>,
) -> CatalogoResult<Json<Vec<DepartamentoDto>>> {
    Ok(Json(service.departamentos().await?))
}

/// Active cities, optionally of a single department
#[utoipa::path(
    get,
    path = "/ciudades",
    tag = TAG,
    params(CiudadFilter),
    responses(
        (status = 200, description = "Active cities", body = Vec<CiudadDto>),
        (status = 400, response = ValidationProblemResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn ciudades<R: CatalogoRepository>(
    State(service): State<Arc<CatalogoService<R>>>,
    ValidatedQuery(filter): ValidatedQuery<CiudadFilter>,
) -> CatalogoResult<Json<Vec<CiudadDto>>> {
    Ok(Json(service.ciudades(filter).await?))
}
