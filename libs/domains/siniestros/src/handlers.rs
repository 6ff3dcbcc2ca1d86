use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    UuidPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestResponse, InternalServerErrorResponse, NotFoundResponse,
        ValidationProblemResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::{SiniestroError, SiniestroResult};
use crate::models::{
    CreateSiniestro, PagedResult, SiniestroDto, SiniestroFilter, UpdateSiniestro,
    VehiculoInvolucradoDto,
};
use crate::repository::SiniestroRepository;
use crate::service::SiniestroService;

pub const TAG: &str = "siniestros";

/// Mount point of [`router`] in the public API
pub const BASE_PATH: &str = "/api/siniestros";

/// OpenAPI documentation for the incident endpoints
#[derive(OpenApi)]
#[openapi(
    paths(create_siniestro, list_siniestros, get_siniestro, update_siniestro),
    components(
        schemas(
            CreateSiniestro,
            UpdateSiniestro,
            VehiculoInvolucradoDto,
            SiniestroDto,
            PagedResult<SiniestroDto>
        ),
        responses(
            ValidationProblemResponse,
            BadRequestResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Road incident records")
    )
)]
pub struct ApiDoc;

/// Incident router, mounted under `/siniestros`
pub fn router<R: SiniestroRepository + 'static>(service: SiniestroService<R>) -> Router {
    Router::new()
        .route("/", get(list_siniestros).post(create_siniestro))
        .route("/{id}", get(get_siniestro).patch(update_siniestro))
        .with_state(Arc::new(service))
}

/// Record a new incident with its vehicles
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateSiniestro,
    responses(
        (status = 201, description = "Incident created; body is the new id", body = Uuid,
            headers(("Location" = String, description = "URL of the new incident"))),
        (status = 400, response = ValidationProblemResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_siniestro<R: SiniestroRepository>(
    State(service): State<Arc<SiniestroService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateSiniestro>,
) -> SiniestroResult<impl IntoResponse> {
    let id = service.create_siniestro(input).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("{BASE_PATH}/{id}"))],
        Json(id),
    ))
}

/// Incidents matching the filters, most recent first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(SiniestroFilter),
    responses(
        (status = 200, description = "One page of incidents", body = PagedResult<SiniestroDto>),
        (status = 400, response = ValidationProblemResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_siniestros<R: SiniestroRepository>(
    State(service): State<Arc<SiniestroService<R>>>,
    ValidatedQuery(filter): ValidatedQuery<SiniestroFilter>,
) -> SiniestroResult<Json<PagedResult<SiniestroDto>>> {
    Ok(Json(service.list_siniestros(filter).await?))
}

/// Incident by id, with lookups and vehicles resolved
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Incident id")),
    responses(
        (status = 200, description = "Incident found", body = SiniestroDto),
        (status = 400, response = ValidationProblemResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_siniestro<R: SiniestroRepository>(
    State(service): State<Arc<SiniestroService<R>>>,
    UuidPath(id): UuidPath,
) -> SiniestroResult<Json<SiniestroDto>> {
    service
        .get_siniestro(id)
        .await?
        .map(Json)
        .ok_or(SiniestroError::NotFound(id))
}

/// Change the description and/or the victim count
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Incident id")),
    request_body = UpdateSiniestro,
    responses(
        (status = 200, description = "Incident updated", body = SiniestroDto),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_siniestro<R: SiniestroRepository>(
    State(service): State<Arc<SiniestroService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateSiniestro>,
) -> SiniestroResult<Json<SiniestroDto>> {
    Ok(Json(service.update_siniestro(id, input).await?))
}
