use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Entities with a stable identifier.
pub trait Identified {
    type Id: Copy;

    fn id(&self) -> Self::Id;
}

/// Entities that record when they were created and last modified.
pub trait Timestamped {
    fn fecha_creacion(&self) -> DateTime<Utc>;

    fn fecha_modificacion(&self) -> Option<DateTime<Utc>> {
        None
    }
}

/// Lookup tables managed by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Catalogo {
    Departamento,
    Ciudad,
    #[strum(serialize = "Tipo de siniestro")]
    TipoSiniestro,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Departamento {
    pub id: i32,
    pub nombre: String,
    pub codigo_dane: Option<String>,
    pub activo: bool,
    pub fecha_creacion: DateTime<Utc>,
}

impl Departamento {
    pub fn new(id: i32, nombre: impl Into<String>, codigo_dane: Option<String>) -> Self {
        Self {
            id,
            nombre: nombre.into(),
            codigo_dane,
            activo: true,
            fecha_creacion: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ciudad {
    pub id: i32,
    pub nombre: String,
    pub departamento_id: i32,
    pub codigo_dane: Option<String>,
    pub activo: bool,
    pub fecha_creacion: DateTime<Utc>,
}

impl Ciudad {
    pub fn new(
        id: i32,
        nombre: impl Into<String>,
        departamento_id: i32,
        codigo_dane: Option<String>,
    ) -> Self {
        Self {
            id,
            nombre: nombre.into(),
            departamento_id,
            codigo_dane,
            activo: true,
            fecha_creacion: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TipoSiniestro {
    pub id: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub activo: bool,
    pub fecha_creacion: DateTime<Utc>,
}

impl TipoSiniestro {
    pub fn new(id: i32, nombre: impl Into<String>, descripcion: Option<String>) -> Self {
        Self {
            id,
            nombre: nombre.into(),
            descripcion,
            activo: true,
            fecha_creacion: Utc::now(),
        }
    }
}

macro_rules! impl_lookup {
    ($($ty:ty),+ $(,)?) => {$(
        impl $ty {
            pub fn activar(&mut self) {
                self.activo = true;
            }

            pub fn desactivar(&mut self) {
                self.activo = false;
            }
        }

        impl Identified for $ty {
            type Id = i32;

            fn id(&self) -> i32 {
                self.id
            }
        }

        impl Timestamped for $ty {
            fn fecha_creacion(&self) -> DateTime<Utc> {
                self.fecha_creacion
            }
        }
    )+};
}

impl_lookup!(Departamento, Ciudad, TipoSiniestro);

/// Department as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DepartamentoDto {
    pub id: i32,
    pub nombre: String,
    #[serde(rename = "codigoDANE")]
    pub codigo_dane: Option<String>,
}

impl From<&Departamento> for DepartamentoDto {
    fn from(d: &Departamento) -> Self {
        Self {
            id: d.id,
            nombre: d.nombre.clone(),
            codigo_dane: d.codigo_dane.clone(),
        }
    }
}

/// City as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CiudadDto {
    pub id: i32,
    pub nombre: String,
    #[serde(rename = "codigoDANE")]
    pub codigo_dane: Option<String>,
}

impl From<&Ciudad> for CiudadDto {
    fn from(c: &Ciudad) -> Self {
        Self {
            id: c.id,
            nombre: c.nombre.clone(),
            codigo_dane: c.codigo_dane.clone(),
        }
    }
}

/// Incident type as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TipoSiniestroDto {
    pub id: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
}

impl From<&TipoSiniestro> for TipoSiniestroDto {
    fn from(t: &TipoSiniestro) -> Self {
        Self {
            id: t.id,
            nombre: t.nombre.clone(),
            descripcion: t.descripcion.clone(),
        }
    }
}

/// Query parameters for `GET /ciudades`
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CiudadFilter {
    /// Only cities of this department
    #[serde(default, deserialize_with = "axum_helpers::empty_as_none")]
    #[validate(range(min = 1, message = "El departamento debe ser mayor que 0"))]
    pub departamento_id: Option<i32>,
}
