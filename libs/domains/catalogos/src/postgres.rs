use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder,
};

use crate::{
    entity::{ciudad, departamento, tipo_siniestro},
    error::{CatalogoError, CatalogoResult},
    models::{Catalogo, Ciudad, Departamento, TipoSiniestro},
    repository::CatalogoRepository,
};

fn db_error(e: DbErr) -> CatalogoError {
    CatalogoError::Internal(format!("Database error: {}", e))
}

/// Load the row, toggle it through the domain type and write `activo` back.
macro_rules! set_activo {
    ($name:ident, $entity:ident, $domain:ty, $catalogo:expr) => {
        async fn $name(&self, id: i32, activo: bool) -> CatalogoResult<()> {
            let model = $entity::Entity::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(db_error)?
                .ok_or(CatalogoError::NotFound {
                    catalogo: $catalogo,
                    id,
                })?;

            let mut domain: $domain = model.clone().into();
            if activo {
                domain.activar();
            } else {
                domain.desactivar();
            }

            let mut active = model.into_active_model();
            active.activo = Set(domain.activo);
            active.update(&self.db).await.map_err(db_error)?;
            Ok(())
        }
    };
}

#[derive(Clone)]
pub struct PgCatalogoRepository {
    db: DatabaseConnection,
}

impl PgCatalogoRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    set_activo!(set_departamento_activo, departamento, Departamento, Catalogo::Departamento);
    set_activo!(set_ciudad_activo, ciudad, Ciudad, Catalogo::Ciudad);
    set_activo!(set_tipo_siniestro_activo, tipo_siniestro, TipoSiniestro, Catalogo::TipoSiniestro);
}

#[async_trait]
impl CatalogoRepository for PgCatalogoRepository {
    async fn tipos_siniestro_activos(&self) -> CatalogoResult<Vec<TipoSiniestro>> {
        let models = tipo_siniestro::Entity::find()
            .filter(tipo_siniestro::Column::Activo.eq(true))
            .order_by_asc(tipo_siniestro::Column::Nombre)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn departamentos_activos(&self) -> CatalogoResult<Vec<Departamento>> {
        let models = departamento::Entity::find()
            .filter(departamento::Column::Activo.eq(true))
            .order_by_asc(departamento::Column::Nombre)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn ciudades_activas(&self, departamento_id: Option<i32>) -> CatalogoResult<Vec<Ciudad>> {
        let mut query = ciudad::Entity::find().filter(ciudad::Column::Activo.eq(true));

        if let Some(departamento_id) = departamento_id {
            query = query.filter(ciudad::Column::DepartamentoId.eq(departamento_id));
        }

        let models = query
            .order_by_asc(ciudad::Column::Nombre)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn set_activo(&self, catalogo: Catalogo, id: i32, activo: bool) -> CatalogoResult<()> {
        match catalogo {
            Catalogo::Departamento => self.set_departamento_activo(id, activo).await?,
            Catalogo::Ciudad => self.set_ciudad_activo(id, activo).await?,
            Catalogo::TipoSiniestro => self.set_tipo_siniestro_activo(id, activo).await?,
        }

        tracing::info!(%catalogo, id, activo, "Updated lookup activation");
        Ok(())
    }
}
