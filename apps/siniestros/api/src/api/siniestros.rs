use axum::Router;
use domain_siniestros::handlers;

pub fn router(state: &crate::state::AppState) -> Router {
    handlers::router(state.siniestros.clone())
}
