//! Shared application state.
//!
//! Every use case is wired here once at start-up; route builders receive
//! the state by reference and clone the services they need.

use database::postgres::DatabaseConnection;
use domain_catalogos::{CatalogoService, PgCatalogoRepository};
use domain_siniestros::{PgSiniestroRepository, SiniestroService};

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: DatabaseConnection,
    pub siniestros: SiniestroService<PgSiniestroRepository>,
    pub catalogos: CatalogoService<PgCatalogoRepository>,
}

impl AppState {
    pub fn new(config: crate::config::Config, db: DatabaseConnection) -> Self {
        Self {
            siniestros: SiniestroService::new(PgSiniestroRepository::new(db.clone())),
            catalogos: CatalogoService::new(PgCatalogoRepository::new(db.clone())),
            config,
            db,
        }
    }
}
