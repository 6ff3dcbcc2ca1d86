//! Reusable OpenAPI responses, referenced from `#[utoipa::path]` as
//! `(status = 400, response = ValidationProblemResponse)`.

use super::ProblemDetails;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "One or more fields failed validation",
    content_type = "application/problem+json",
    example = json!({
        "type": "https://tools.ietf.org/html/rfc7231#section-6.5.1",
        "title": "One or more validation errors occurred",
        "status": 400,
        "errors": {
            "fechaHora": ["La fecha y hora no puede ser futura"],
            "vehiculos[0].placa": ["La placa es requerida"]
        }
    })
)]
pub struct ValidationProblemResponse(pub ProblemDetails);

#[derive(ToResponse)]
#[response(
    description = "Bad request",
    content_type = "application/problem+json",
    example = json!({
        "type": "https://tools.ietf.org/html/rfc7231#section-6.6.1",
        "title": "An error occurred while processing your request",
        "status": 400,
        "detail": "El departamento 99 no existe"
    })
)]
pub struct BadRequestResponse(pub ProblemDetails);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/problem+json",
    example = json!({
        "type": "https://tools.ietf.org/html/rfc7231#section-6.6.1",
        "title": "An error occurred while processing your request",
        "status": 404,
        "detail": "Siniestro no encontrado"
    })
)]
pub struct NotFoundResponse(pub ProblemDetails);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/problem+json",
    example = json!({
        "type": "https://tools.ietf.org/html/rfc7231#section-6.6.1",
        "title": "An error occurred while processing your request",
        "status": 500,
        "detail": "An internal server error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ProblemDetails);
