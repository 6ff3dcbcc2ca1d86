use chrono::{DateTime, Utc};
use domain_catalogos::{
    Ciudad, CiudadDto, Departamento, DepartamentoDto, Identified, Timestamped, TipoSiniestro,
    TipoSiniestroDto,
};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{SiniestroError, SiniestroResult};

pub const DEFAULT_PAGE_NUMBER: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;
/// Keeps the row offset well inside the `BIGINT` range
pub const MAX_PAGE_NUMBER: u64 = 10_000_000;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

fn not_future(fecha: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *fecha > Utc::now() {
        return Err(ValidationError::new("not_future"));
    }
    Ok(())
}

// ============================================================================
// Aggregate
// ============================================================================

/// Vehicle owned by exactly one incident
#[derive(Debug, Clone, PartialEq)]
pub struct VehiculoInvolucrado {
    pub id: Uuid,
    /// Nil until the vehicle is attached with [`Siniestro::agregar_vehiculo`]
    pub siniestro_id: Uuid,
    pub tipo: String,
    pub placa: String,
    pub marca: String,
    pub modelo: String,
    pub fecha_creacion: DateTime<Utc>,
}

impl VehiculoInvolucrado {
    /// Fails on the first blank field, checked in the order tipo, placa, marca, modelo.
    pub fn new(
        tipo: impl Into<String>,
        placa: impl Into<String>,
        marca: impl Into<String>,
        modelo: impl Into<String>,
    ) -> SiniestroResult<Self> {
        let (tipo, placa, marca, modelo) = (tipo.into(), placa.into(), marca.into(), modelo.into());

        let required = [
            (&tipo, "El tipo de vehículo es requerido"),
            (&placa, "La placa es requerida"),
            (&marca, "La marca es requerida"),
            (&modelo, "El modelo es requerido"),
        ];
        if let Some((_, message)) = required.iter().find(|(value, _)| is_blank(value)) {
            return Err(SiniestroError::Validation(message.to_string()));
        }

        Ok(Self {
            id: Uuid::now_v7(),
            siniestro_id: Uuid::nil(),
            tipo,
            placa,
            marca,
            modelo,
            fecha_creacion: Utc::now(),
        })
    }
}

/// Road incident aggregate root.
///
/// Immutable once created except for the description and the victim count,
/// which stamp `fecha_modificacion` when changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Siniestro {
    pub id: Uuid,
    pub fecha_hora: DateTime<Utc>,
    pub departamento_id: i32,
    pub ciudad_id: i32,
    pub tipo_siniestro_id: i32,
    pub numero_victimas: i32,
    pub descripcion: Option<String>,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_modificacion: Option<DateTime<Utc>>,
    pub vehiculos: Vec<VehiculoInvolucrado>,
}

impl Siniestro {
    pub fn new(
        fecha_hora: DateTime<Utc>,
        departamento_id: i32,
        ciudad_id: i32,
        tipo_siniestro_id: i32,
        numero_victimas: i32,
        descripcion: Option<String>,
    ) -> SiniestroResult<Self> {
        if fecha_hora > Utc::now() {
            return Err(SiniestroError::Validation(
                "La fecha y hora no puede ser futura".to_string(),
            ));
        }
        validar_numero_victimas(numero_victimas)?;

        Ok(Self {
            id: Uuid::now_v7(),
            fecha_hora,
            departamento_id,
            ciudad_id,
            tipo_siniestro_id,
            numero_victimas,
            descripcion,
            fecha_creacion: Utc::now(),
            fecha_modificacion: None,
            vehiculos: Vec::new(),
        })
    }

    /// Replace the generated identifier, for fixtures and seed data.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        for vehiculo in &mut self.vehiculos {
            vehiculo.siniestro_id = id;
        }
        self
    }

    pub fn agregar_vehiculo(&mut self, mut vehiculo: VehiculoInvolucrado) {
        vehiculo.siniestro_id = self.id;
        self.vehiculos.push(vehiculo);
    }

    pub fn actualizar_descripcion(&mut self, descripcion: Option<String>) {
        self.descripcion = descripcion;
        self.fecha_modificacion = Some(Utc::now());
    }

    pub fn actualizar_numero_victimas(&mut self, numero_victimas: i32) -> SiniestroResult<()> {
        validar_numero_victimas(numero_victimas)?;
        self.numero_victimas = numero_victimas;
        self.fecha_modificacion = Some(Utc::now());
        Ok(())
    }
}

fn validar_numero_victimas(numero_victimas: i32) -> SiniestroResult<()> {
    if numero_victimas < 0 {
        return Err(SiniestroError::Validation(
            "El número de víctimas no puede ser negativo".to_string(),
        ));
    }
    Ok(())
}

impl Identified for Siniestro {
    type Id = Uuid;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Timestamped for Siniestro {
    fn fecha_creacion(&self) -> DateTime<Utc> {
        self.fecha_creacion
    }

    fn fecha_modificacion(&self) -> Option<DateTime<Utc>> {
        self.fecha_modificacion
    }
}

impl Identified for VehiculoInvolucrado {
    type Id = Uuid;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Timestamped for VehiculoInvolucrado {
    fn fecha_creacion(&self) -> DateTime<Utc> {
        self.fecha_creacion
    }
}

/// Aggregate loaded together with the lookup rows it references
#[derive(Debug, Clone, PartialEq)]
pub struct SiniestroDetalle {
    pub siniestro: Siniestro,
    pub departamento: Departamento,
    pub ciudad: Ciudad,
    pub tipo_siniestro: TipoSiniestro,
}

// ============================================================================
// Commands
// ============================================================================

/// Vehicle as sent and returned over the API
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct VehiculoInvolucradoDto {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "El tipo de vehículo es requerido"),
        length(max = 50, message = "El tipo de vehículo no puede exceder 50 caracteres")
    )]
    #[schema(example = "Automóvil")]
    pub tipo: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "La placa es requerida"),
        length(max = 20, message = "La placa no puede exceder 20 caracteres")
    )]
    #[schema(example = "ABC123")]
    pub placa: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "La marca es requerida"),
        length(max = 100, message = "La marca no puede exceder 100 caracteres")
    )]
    #[schema(example = "Chevrolet")]
    pub marca: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "El modelo es requerido"),
        length(max = 100, message = "El modelo no puede exceder 100 caracteres")
    )]
    #[schema(example = "Spark GT")]
    pub modelo: String,
}

impl From<&VehiculoInvolucrado> for VehiculoInvolucradoDto {
    fn from(v: &VehiculoInvolucrado) -> Self {
        Self {
            tipo: v.tipo.clone(),
            placa: v.placa.clone(),
            marca: v.marca.clone(),
            modelo: v.modelo.clone(),
        }
    }
}

/// Payload of `POST /siniestros`.
///
/// Missing numeric ids and an absent vehicle list default to values that
/// fail validation, so every problem is reported in one response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSiniestro {
    #[validate(
        required(message = "La fecha y hora es requerida"),
        custom(function = "not_future", message = "La fecha y hora no puede ser futura")
    )]
    #[schema(value_type = String, format = DateTime, example = "2025-03-01T14:30:00Z")]
    pub fecha_hora: Option<DateTime<Utc>>,

    #[serde(default)]
    #[validate(range(min = 1, message = "El departamento es requerido"))]
    pub departamento_id: i32,

    #[serde(default)]
    #[validate(range(min = 1, message = "La ciudad es requerida"))]
    pub ciudad_id: i32,

    #[serde(default)]
    #[validate(range(min = 1, message = "El tipo de siniestro es requerido"))]
    pub tipo_siniestro_id: i32,

    #[serde(default)]
    #[validate(range(min = 0, message = "El número de víctimas debe ser mayor o igual a 0"))]
    pub numero_victimas: i32,

    #[validate(length(max = 1000, message = "La descripción no puede exceder 1000 caracteres"))]
    pub descripcion: Option<String>,

    #[serde(default)]
    #[validate(
        length(min = 1, message = "Al menos un vehículo debe estar involucrado"),
        nested
    )]
    pub vehiculos: Vec<VehiculoInvolucradoDto>,
}

/// Payload of `PATCH /siniestros/{id}`.
///
/// A blank `descripcion` clears the description.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSiniestro {
    #[validate(length(max = 1000, message = "La descripción no puede exceder 1000 caracteres"))]
    pub descripcion: Option<String>,

    #[validate(range(min = 0, message = "El número de víctimas debe ser mayor o igual a 0"))]
    pub numero_victimas: Option<i32>,
}

impl UpdateSiniestro {
    pub fn is_empty(&self) -> bool {
        self.descripcion.is_none() && self.numero_victimas.is_none()
    }
}

// ============================================================================
// Queries
// ============================================================================

/// Query parameters for `GET /siniestros`.
///
/// Dates accept RFC 3339 timestamps or plain `YYYY-MM-DD` dates; a plain
/// `fechaInicio` starts at 00:00 UTC and a plain `fechaFin` ends at the last
/// microsecond of the day, so both bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SiniestroFilter {
    #[serde(default, deserialize_with = "axum_helpers::empty_as_none")]
    #[validate(range(min = 1, message = "El departamento debe ser mayor que 0"))]
    pub departamento_id: Option<i32>,

    #[serde(default, deserialize_with = "fecha::inicio")]
    #[param(value_type = Option<String>, example = "2025-01-01")]
    pub fecha_inicio: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "fecha::fin")]
    #[param(value_type = Option<String>, example = "2025-01-31")]
    pub fecha_fin: Option<DateTime<Utc>>,

    #[serde(default = "default_page_number", deserialize_with = "page_number_or_default")]
    #[validate(range(
        min = 1,
        max = 10_000_000,
        message = "El número de página debe estar entre 1 y 10000000"
    ))]
    #[param(minimum = 1, maximum = 10_000_000, default = 1)]
    pub page_number: u64,

    #[serde(default = "default_page_size", deserialize_with = "page_size_or_default")]
    #[validate(range(
        min = 1,
        max = 100,
        message = "El tamaño de página debe estar entre 1 y 100"
    ))]
    #[param(minimum = 1, maximum = 100, default = 10)]
    pub page_size: u64,
}

fn default_page_number() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

fn page_number_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    Ok(axum_helpers::empty_as_none(d)?.unwrap_or(DEFAULT_PAGE_NUMBER))
}

fn page_size_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    Ok(axum_helpers::empty_as_none(d)?.unwrap_or(DEFAULT_PAGE_SIZE))
}

impl Default for SiniestroFilter {
    fn default() -> Self {
        Self {
            departamento_id: None,
            fecha_inicio: None,
            fecha_fin: None,
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SiniestroFilter {
    /// Rows skipped before the requested page
    pub fn offset(&self) -> u64 {
        let page_number = self.page_number.min(MAX_PAGE_NUMBER);
        let page_size = self.page_size.min(MAX_PAGE_SIZE);
        page_number.saturating_sub(1) * page_size
    }

    pub fn matches(&self, siniestro: &Siniestro) -> bool {
        self.departamento_id
            .is_none_or(|id| siniestro.departamento_id == id)
            && self.fecha_inicio.is_none_or(|inicio| siniestro.fecha_hora >= inicio)
            && self.fecha_fin.is_none_or(|fin| siniestro.fecha_hora <= fin)
    }

    /// `fechaInicio` must not be after `fechaFin`.
    pub fn validar_rango(&self) -> SiniestroResult<()> {
        match (self.fecha_inicio, self.fecha_fin) {
            (Some(inicio), Some(fin)) if inicio > fin => Err(SiniestroError::InvalidField {
                field: "fechaFin",
                message: "La fecha fin debe ser mayor o igual a la fecha inicio".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

mod fecha {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    fn parse<E: Error>(raw: &str, end_of_day: bool) -> Result<Option<DateTime<Utc>>, E> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Some(ts.with_timezone(&Utc)));
        }

        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| E::custom(format!("fecha inválida '{raw}', use YYYY-MM-DD o RFC 3339")))?;
        let time = if end_of_day {
            date.and_hms_micro_opt(23, 59, 59, 999_999)
        } else {
            date.and_hms_opt(0, 0, 0)
        };

        time.map(|t| Some(t.and_utc()))
            .ok_or_else(|| E::custom(format!("fecha inválida '{raw}'")))
    }

    pub fn inicio<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw, false)
    }

    pub fn fin<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw, true)
    }
}

// ============================================================================
// Responses
// ============================================================================

/// One page of results plus the total match count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub data: Vec<T>,
    pub page_number: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub total_pages: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> PagedResult<T> {
    pub fn new(data: Vec<T>, page_number: u64, page_size: u64, total_count: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_count.div_ceil(page_size)
        };

        Self {
            data,
            page_number,
            page_size,
            total_count,
            total_pages,
            has_previous: page_number > 1,
            has_next: page_number < total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            data: self.data.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
            has_previous: self.has_previous,
            has_next: self.has_next,
        }
    }
}

/// Incident as returned by the API, lookups resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiniestroDto {
    pub id: Uuid,
    pub fecha_hora: DateTime<Utc>,
    pub departamento: DepartamentoDto,
    pub ciudad: CiudadDto,
    pub tipo_siniestro: TipoSiniestroDto,
    pub numero_victimas: i32,
    pub descripcion: Option<String>,
    pub vehiculos: Vec<VehiculoInvolucradoDto>,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_modificacion: Option<DateTime<Utc>>,
}

impl From<&SiniestroDetalle> for SiniestroDto {
    fn from(detalle: &SiniestroDetalle) -> Self {
        let s = &detalle.siniestro;
        Self {
            id: s.id,
            fecha_hora: s.fecha_hora,
            departamento: DepartamentoDto::from(&detalle.departamento),
            ciudad: CiudadDto::from(&detalle.ciudad),
            tipo_siniestro: TipoSiniestroDto::from(&detalle.tipo_siniestro),
            numero_victimas: s.numero_victimas,
            descripcion: s.descripcion.clone(),
            vehiculos: s.vehiculos.iter().map(VehiculoInvolucradoDto::from).collect(),
            fecha_creacion: s.fecha_creacion,
            fecha_modificacion: s.fecha_modificacion,
        }
    }
}
