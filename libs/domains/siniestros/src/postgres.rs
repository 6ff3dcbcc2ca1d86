use async_trait::async_trait;
use domain_catalogos::entity::{ciudad, departamento, tipo_siniestro};
use domain_catalogos::{Catalogo, Ciudad, Departamento, TipoSiniestro};
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, SqlErr, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    entity::{siniestro, vehiculo_involucrado},
    error::{SiniestroError, SiniestroResult},
    models::{Siniestro, SiniestroDetalle, SiniestroFilter, VehiculoInvolucrado},
    repository::SiniestroRepository,
};

fn db_error(e: DbErr) -> SiniestroError {
    SiniestroError::Internal(format!("Database error: {}", e))
}

/// Foreign key violations on the incident row name the lookup that was missing.
fn insert_error(e: DbErr, siniestro: &Siniestro) -> SiniestroError {
    if let Some(SqlErr::ForeignKeyConstraintViolation(message)) = e.sql_err() {
        let references = [
            (
                "fk_siniestros_departamento_id",
                Catalogo::Departamento,
                siniestro.departamento_id,
            ),
            ("fk_siniestros_ciudad_id", Catalogo::Ciudad, siniestro.ciudad_id),
            (
                "fk_siniestros_tipo_siniestro_id",
                Catalogo::TipoSiniestro,
                siniestro.tipo_siniestro_id,
            ),
        ];
        if let Some((_, catalogo, id)) = references
            .into_iter()
            .find(|(constraint, _, _)| message.contains(constraint))
        {
            return SiniestroError::InvalidReference { catalogo, id };
        }
    }
    db_error(e)
}

fn filtered(filter: &SiniestroFilter) -> Select<siniestro::Entity> {
    let mut query = siniestro::Entity::find();

    if let Some(departamento_id) = filter.departamento_id {
        query = query.filter(siniestro::Column::DepartamentoId.eq(departamento_id));
    }

    if let Some(inicio) = filter.fecha_inicio {
        query = query.filter(siniestro::Column::FechaHora.gte(inicio));
    }

    if let Some(fin) = filter.fecha_fin {
        query = query.filter(siniestro::Column::FechaHora.lte(fin));
    }

    query
}

#[derive(Clone)]
pub struct PgSiniestroRepository {
    db: DatabaseConnection,
}

impl PgSiniestroRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolve vehicles and lookups for a batch of rows with one query per table.
    async fn detalles(
        &self,
        models: Vec<siniestro::Model>,
    ) -> SiniestroResult<Vec<SiniestroDetalle>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let mut vehiculos: HashMap<Uuid, Vec<VehiculoInvolucrado>> = HashMap::new();
        for vehiculo in vehiculo_involucrado::Entity::find()
            .filter(vehiculo_involucrado::Column::SiniestroId.is_in(ids))
            .order_by_asc(vehiculo_involucrado::Column::FechaCreacion)
            .order_by_asc(vehiculo_involucrado::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?
        {
            vehiculos
                .entry(vehiculo.siniestro_id)
                .or_default()
                .push(vehiculo.into());
        }

        let departamentos: HashMap<i32, Departamento> = departamento::Entity::find()
            .filter(departamento::Column::Id.is_in(models.iter().map(|m| m.departamento_id)))
            .all(&self.db)
            .await
            .map_err(db_error)?
            .into_iter()
            .map(|m| (m.id, m.into()))
            .collect();

        let ciudades: HashMap<i32, Ciudad> = ciudad::Entity::find()
            .filter(ciudad::Column::Id.is_in(models.iter().map(|m| m.ciudad_id)))
            .all(&self.db)
            .await
            .map_err(db_error)?
            .into_iter()
            .map(|m| (m.id, m.into()))
            .collect();

        let tipos: HashMap<i32, TipoSiniestro> = tipo_siniestro::Entity::find()
            .filter(tipo_siniestro::Column::Id.is_in(models.iter().map(|m| m.tipo_siniestro_id)))
            .all(&self.db)
            .await
            .map_err(db_error)?
            .into_iter()
            .map(|m| (m.id, m.into()))
            .collect();

        models
            .into_iter()
            .map(|model| {
                let missing = |what: &str, id: i32| {
                    SiniestroError::Internal(format!(
                        "Siniestro {} references missing {} {}",
                        model.id, what, id
                    ))
                };
                let departamento = departamentos
                    .get(&model.departamento_id)
                    .cloned()
                    .ok_or_else(|| missing("departamento", model.departamento_id))?;
                let ciudad = ciudades
                    .get(&model.ciudad_id)
                    .cloned()
                    .ok_or_else(|| missing("ciudad", model.ciudad_id))?;
                let tipo_siniestro = tipos
                    .get(&model.tipo_siniestro_id)
                    .cloned()
                    .ok_or_else(|| missing("tipo_siniestro", model.tipo_siniestro_id))?;
                let vehiculos = vehiculos.remove(&model.id).unwrap_or_default();

                Ok(SiniestroDetalle {
                    siniestro: model.into_domain(vehiculos),
                    departamento,
                    ciudad,
                    tipo_siniestro,
                })
            })
            .collect()
    }
}

#[async_trait]
impl SiniestroRepository for PgSiniestroRepository {
    async fn create(&self, siniestro: Siniestro) -> SiniestroResult<Uuid> {
        let txn = self.db.begin().await.map_err(db_error)?;

        siniestro::ActiveModel::from(&siniestro)
            .insert(&txn)
            .await
            .map_err(|e| insert_error(e, &siniestro))?;

        if !siniestro.vehiculos.is_empty() {
            vehiculo_involucrado::Entity::insert_many(
                siniestro
                    .vehiculos
                    .iter()
                    .map(vehiculo_involucrado::ActiveModel::from),
            )
            .exec(&txn)
            .await
            .map_err(db_error)?;
        }

        // Dropping the transaction on any error above rolls back the parent row
        txn.commit().await.map_err(db_error)?;

        tracing::info!(
            siniestro_id = %siniestro.id,
            departamento_id = siniestro.departamento_id,
            vehiculos = siniestro.vehiculos.len(),
            "Created siniestro"
        );
        Ok(siniestro.id)
    }

    async fn get_by_id(&self, id: Uuid) -> SiniestroResult<Option<SiniestroDetalle>> {
        let Some(model) = siniestro::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?
        else {
            return Ok(None);
        };

        Ok(self.detalles(vec![model]).await?.pop())
    }

    async fn list(&self, filter: &SiniestroFilter) -> SiniestroResult<Vec<SiniestroDetalle>> {
        let models = filtered(filter)
            .order_by_desc(siniestro::Column::FechaHora)
            .order_by_desc(siniestro::Column::Id)
            .offset(filter.offset())
            .limit(filter.page_size)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        self.detalles(models).await
    }

    async fn count(&self, filter: &SiniestroFilter) -> SiniestroResult<u64> {
        filtered(filter).count(&self.db).await.map_err(db_error)
    }

    async fn update(&self, siniestro: &Siniestro) -> SiniestroResult<()> {
        let active = siniestro::ActiveModel {
            id: Unchanged(siniestro.id),
            numero_victimas: Set(siniestro.numero_victimas),
            descripcion: Set(siniestro.descripcion.clone()),
            fecha_modificacion: Set(siniestro.fecha_modificacion.map(Into::into)),
            ..Default::default()
        };

        match active.update(&self.db).await {
            Ok(_) => {
                tracing::info!(siniestro_id = %siniestro.id, "Updated siniestro");
                Ok(())
            }
            Err(DbErr::RecordNotUpdated) => Err(SiniestroError::NotFound(siniestro.id)),
            Err(e) => Err(db_error(e)),
        }
    }
}
