//! # Axum Helpers
//!
//! Shared HTTP plumbing for the siniestros service.
//!
//! - **[`errors`]**: [`AppError`] and the problem-details response body
//! - **[`extractors`]**: [`UuidPath`], [`ValidatedJson`], [`ValidatedQuery`]
//! - **[`http`]**: CORS and security header middleware
//! - **[`server`]**: router assembly with OpenAPI UIs, health endpoints,
//!   graceful shutdown

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use errors::{AppError, ErrorCode, FieldErrors, ProblemDetails};
pub use extractors::{UuidPath, ValidatedJson, ValidatedQuery, empty_as_none};
pub use http::{cors_layer_from_env, security_headers};
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};
