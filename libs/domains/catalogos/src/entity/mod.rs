//! sea-orm entities for the lookup tables.

pub mod ciudad;
pub mod departamento;
pub mod tipo_siniestro;
