//! Catalogos Domain
//!
//! Reference data the incident records point at: departments, cities and
//! incident types. Rows are seeded by the `migration` crate and are only ever
//! activated or deactivated, never deleted; every read returns active rows.
//!
//! ```rust,no_run
//! use domain_catalogos::{handlers, InMemoryCatalogoRepository, CatalogoService};
//!
//! let service = CatalogoService::new(InMemoryCatalogoRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{CatalogoError, CatalogoResult};
pub use handlers::ApiDoc;
pub use models::{
    Catalogo, Ciudad, CiudadDto, CiudadFilter, Departamento, DepartamentoDto, Identified,
    Timestamped, TipoSiniestro, TipoSiniestroDto,
};
pub use postgres::PgCatalogoRepository;
pub use repository::{CatalogoRepository, InMemoryCatalogoRepository};
pub use service::CatalogoService;
