use axum::Router;
use domain_catalogos::handlers;

pub fn router(state: &crate::state::AppState) -> Router {
    handlers::router(state.catalogos.clone())
}
