use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;

/// CORS policy from `CORS_ALLOWED_ORIGIN`.
///
/// Unset or blank means any origin, method and header (the service has no
/// credentials to protect). Otherwise a comma-separated origin allow-list.
pub fn cors_layer_from_env() -> io::Result<CorsLayer> {
    let raw = std::env::var("CORS_ALLOWED_ORIGIN").unwrap_or_default();
    cors_layer(&raw)
}

pub fn cors_layer(allowed: &str) -> io::Result<CorsLayer> {
    let origins = allowed
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(HeaderValue::from_str)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {e}"),
            )
        })?;

    if origins.is_empty() {
        info!("CORS: allowing any origin");
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    info!(origins = allowed, "CORS: restricted origins");
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::LOCATION])
        .max_age(Duration::from_secs(3600)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_means_permissive() {
        assert!(cors_layer("").is_ok());
        assert!(cors_layer(" , ").is_ok());
    }

    #[test]
    fn test_origin_list() {
        assert!(cors_layer("http://localhost:3000, https://siniestros.gov.co").is_ok());
    }

    #[test]
    fn test_invalid_origin_rejected() {
        let err = cors_layer("http://ok.co,bad\u{7f}origin").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
