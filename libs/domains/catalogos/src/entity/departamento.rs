use sea_orm::entity::prelude::*;

use crate::models::Departamento;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "departamentos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub nombre: String,
    pub codigo_dane: Option<String>,
    pub activo: bool,
    pub fecha_creacion: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ciudad::Entity")]
    Ciudades,
}

impl Related<super::ciudad::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ciudades.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Departamento {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            nombre: model.nombre,
            codigo_dane: model.codigo_dane,
            activo: model.activo,
            fecha_creacion: model.fecha_creacion.into(),
        }
    }
}
