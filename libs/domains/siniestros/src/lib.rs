//! Siniestros Domain
//!
//! Road incident records and the vehicles involved in them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, OpenAPI
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Use cases: create, list, get, update
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Port + in-memory and PostgreSQL adapters
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Aggregate, commands, queries, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalogos::InMemoryCatalogoRepository;
//! use domain_siniestros::{handlers, InMemorySiniestroRepository, SiniestroService};
//!
//! let repository = InMemorySiniestroRepository::new(InMemoryCatalogoRepository::new());
//! let router = handlers::router(SiniestroService::new(repository));
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{SiniestroError, SiniestroResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateSiniestro, PagedResult, Siniestro, SiniestroDetalle, SiniestroDto, SiniestroFilter,
    UpdateSiniestro, VehiculoInvolucrado, VehiculoInvolucradoDto,
};
pub use postgres::PgSiniestroRepository;
pub use repository::{InMemorySiniestroRepository, SiniestroRepository};
pub use service::SiniestroService;
