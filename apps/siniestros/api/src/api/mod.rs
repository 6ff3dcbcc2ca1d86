use axum::{Router, routing::get};

use crate::state::AppState;

pub mod catalogos;
pub mod health;
pub mod siniestros;

/// API routes without the `/api` prefix; `create_router` adds it.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/siniestros", siniestros::router(state))
        .nest("/catalogos", catalogos::router(state))
}

/// `/ready`, with state applied so it merges into the stateless app router.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
