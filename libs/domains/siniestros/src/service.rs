use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{SiniestroError, SiniestroResult};
use crate::models::{
    CreateSiniestro, PagedResult, Siniestro, SiniestroDto, SiniestroFilter, UpdateSiniestro,
    VehiculoInvolucrado,
};
use crate::repository::SiniestroRepository;

/// Use cases for the incident aggregate
#[derive(Clone)]
pub struct SiniestroService<R: SiniestroRepository> {
    repository: Arc<R>,
}

impl<R: SiniestroRepository> SiniestroService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Build the aggregate from the payload, persist it and return its id
    pub async fn create_siniestro(&self, input: CreateSiniestro) -> SiniestroResult<Uuid> {
        input.validate()?;

        let fecha_hora = input
            .fecha_hora
            .ok_or_else(|| SiniestroError::Validation("La fecha y hora es requerida".into()))?;

        let mut siniestro = Siniestro::new(
            fecha_hora,
            input.departamento_id,
            input.ciudad_id,
            input.tipo_siniestro_id,
            input.numero_victimas,
            input.descripcion,
        )?;

        for vehiculo in input.vehiculos {
            siniestro.agregar_vehiculo(VehiculoInvolucrado::new(
                vehiculo.tipo,
                vehiculo.placa,
                vehiculo.marca,
                vehiculo.modelo,
            )?);
        }

        self.repository.create(siniestro).await
    }

    /// Filtered page of incidents, most recent first
    pub async fn list_siniestros(
        &self,
        filter: SiniestroFilter,
    ) -> SiniestroResult<PagedResult<SiniestroDto>> {
        filter.validate()?;
        filter.validar_rango()?;

        let (total, detalles) =
            tokio::try_join!(self.repository.count(&filter), self.repository.list(&filter))?;

        tracing::debug!(
            departamento_id = ?filter.departamento_id,
            page_number = filter.page_number,
            total,
            "Listed siniestros"
        );

        let data = detalles.iter().map(SiniestroDto::from).collect();
        Ok(PagedResult::new(
            data,
            filter.page_number,
            filter.page_size,
            total,
        ))
    }

    /// `None` when no incident has this id
    pub async fn get_siniestro(&self, id: Uuid) -> SiniestroResult<Option<SiniestroDto>> {
        let detalle = self.repository.get_by_id(id).await?;
        Ok(detalle.as_ref().map(SiniestroDto::from))
    }

    /// Apply the description and victim count updates
    pub async fn update_siniestro(
        &self,
        id: Uuid,
        input: UpdateSiniestro,
    ) -> SiniestroResult<SiniestroDto> {
        input.validate()?;
        if input.is_empty() {
            return Err(SiniestroError::Validation(
                "Debe indicar la descripción o el número de víctimas a actualizar".into(),
            ));
        }

        let mut detalle = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(SiniestroError::NotFound(id))?;

        if let Some(descripcion) = input.descripcion {
            let descripcion = Some(descripcion).filter(|d| !d.trim().is_empty());
            detalle.siniestro.actualizar_descripcion(descripcion);
        }
        if let Some(numero_victimas) = input.numero_victimas {
            detalle.siniestro.actualizar_numero_victimas(numero_victimas)?;
        }

        self.repository.update(&detalle.siniestro).await?;
        Ok(SiniestroDto::from(&detalle))
    }
}
