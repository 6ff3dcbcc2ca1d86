//! sea-orm entities for the incident tables.

pub mod siniestro;
pub mod vehiculo_involucrado;
