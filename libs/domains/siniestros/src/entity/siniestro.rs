use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::{Siniestro, VehiculoInvolucrado};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "siniestros")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub fecha_hora: DateTimeWithTimeZone,
    pub departamento_id: i32,
    pub ciudad_id: i32,
    pub tipo_siniestro_id: i32,
    pub numero_victimas: i32,
    pub descripcion: Option<String>,
    pub fecha_creacion: DateTimeWithTimeZone,
    pub fecha_modificacion: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::vehiculo_involucrado::Entity")]
    Vehiculos,
}

impl Related<super::vehiculo_involucrado::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehiculos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_domain(self, vehiculos: Vec<VehiculoInvolucrado>) -> Siniestro {
        Siniestro {
            id: self.id,
            fecha_hora: self.fecha_hora.into(),
            departamento_id: self.departamento_id,
            ciudad_id: self.ciudad_id,
            tipo_siniestro_id: self.tipo_siniestro_id,
            numero_victimas: self.numero_victimas,
            descripcion: self.descripcion,
            fecha_creacion: self.fecha_creacion.into(),
            fecha_modificacion: self.fecha_modificacion.map(Into::into),
            vehiculos,
        }
    }
}

impl From<&Siniestro> for ActiveModel {
    fn from(s: &Siniestro) -> Self {
        ActiveModel {
            id: Set(s.id),
            fecha_hora: Set(s.fecha_hora.into()),
            departamento_id: Set(s.departamento_id),
            ciudad_id: Set(s.ciudad_id),
            tipo_siniestro_id: Set(s.tipo_siniestro_id),
            numero_victimas: Set(s.numero_victimas),
            descripcion: Set(s.descripcion.clone()),
            fecha_creacion: Set(s.fecha_creacion.into()),
            fecha_modificacion: Set(s.fecha_modificacion.map(Into::into)),
        }
    }
}
