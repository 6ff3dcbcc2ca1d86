use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::VehiculoInvolucrado;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "vehiculos_involucrados")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub siniestro_id: Uuid,
    pub tipo: String,
    pub placa: String,
    pub marca: String,
    pub modelo: String,
    pub fecha_creacion: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::siniestro::Entity",
        from = "Column::SiniestroId",
        to = "super::siniestro::Column::Id",
        on_delete = "Cascade"
    )]
    Siniestro,
}

impl Related<super::siniestro::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Siniestro.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for VehiculoInvolucrado {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            siniestro_id: model.siniestro_id,
            tipo: model.tipo,
            placa: model.placa,
            marca: model.marca,
            modelo: model.modelo,
            fecha_creacion: model.fecha_creacion.into(),
        }
    }
}

impl From<&VehiculoInvolucrado> for ActiveModel {
    fn from(v: &VehiculoInvolucrado) -> Self {
        ActiveModel {
            id: Set(v.id),
            siniestro_id: Set(v.siniestro_id),
            tipo: Set(v.tipo.clone()),
            placa: Set(v.placa.clone()),
            marca: Set(v.marca.clone()),
            modelo: Set(v.modelo.clone()),
            fecha_creacion: Set(v.fecha_creacion.into()),
        }
    }
}
