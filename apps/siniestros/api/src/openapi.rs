use utoipa::OpenApi;

/// Root OpenAPI document; domain documents are nested at their mount points.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Siniestros Viales API",
        description = "Registro y consulta de siniestros viales en Colombia"
    ),
    nest(
        (path = domain_siniestros::handlers::BASE_PATH, api = domain_siniestros::ApiDoc),
        (path = "/api/catalogos", api = domain_catalogos::ApiDoc)
    )
)]
pub struct ApiDoc;
