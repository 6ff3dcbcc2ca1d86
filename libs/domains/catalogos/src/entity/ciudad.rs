use sea_orm::entity::prelude::*;

use crate::models::Ciudad;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ciudades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nombre: String,
    pub departamento_id: i32,
    pub codigo_dane: Option<String>,
    pub activo: bool,
    pub fecha_creacion: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departamento::Entity",
        from = "Column::DepartamentoId",
        to = "super::departamento::Column::Id"
    )]
    Departamento,
}

impl Related<super::departamento::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Departamento.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Ciudad {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            nombre: model.nombre,
            departamento_id: model.departamento_id,
            codigo_dane: model.codigo_dane,
            activo: model.activo,
            fecha_creacion: model.fecha_creacion.into(),
        }
    }
}
