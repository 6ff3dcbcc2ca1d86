use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_catalogos::{Ciudades, Departamentos, TiposSiniestro};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Siniestros::Table)
                    .if_not_exists()
                    .col(pk_uuid(Siniestros::Id))
                    .col(timestamp_with_time_zone(Siniestros::FechaHora))
                    .col(integer(Siniestros::DepartamentoId))
                    .col(integer(Siniestros::CiudadId))
                    .col(integer(Siniestros::TipoSiniestroId))
                    .col(integer(Siniestros::NumeroVictimas).default(0))
                    .col(string_len_null(Siniestros::Descripcion, 1000))
                    .col(
                        timestamp_with_time_zone(Siniestros::FechaCreacion)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Siniestros::FechaModificacion))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_siniestros_departamento_id")
                            .from(Siniestros::Table, Siniestros::DepartamentoId)
                            .to(Departamentos::Table, Departamentos::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_siniestros_ciudad_id")
                            .from(Siniestros::Table, Siniestros::CiudadId)
                            .to(Ciudades::Table, Ciudades::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_siniestros_tipo_siniestro_id")
                            .from(Siniestros::Table, Siniestros::TipoSiniestroId)
                            .to(TiposSiniestro::Table, TiposSiniestro::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_siniestros_departamento_id", Siniestros::DepartamentoId),
            ("idx_siniestros_ciudad_id", Siniestros::CiudadId),
            ("idx_siniestros_tipo_siniestro_id", Siniestros::TipoSiniestroId),
            ("idx_siniestros_fecha_hora", Siniestros::FechaHora),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Siniestros::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        // Serves the department + date range listing
        manager
            .create_index(
                Index::create()
                    .name("idx_siniestros_departamento_fecha")
                    .table(Siniestros::Table)
                    .col(Siniestros::DepartamentoId)
                    .col(Siniestros::FechaHora)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VehiculosInvolucrados::Table)
                    .if_not_exists()
                    .col(pk_uuid(VehiculosInvolucrados::Id))
                    .col(uuid(VehiculosInvolucrados::SiniestroId))
                    .col(string_len(VehiculosInvolucrados::Tipo, 50))
                    .col(string_len(VehiculosInvolucrados::Placa, 20))
                    .col(string_len(VehiculosInvolucrados::Marca, 100))
                    .col(string_len(VehiculosInvolucrados::Modelo, 100))
                    .col(
                        timestamp_with_time_zone(VehiculosInvolucrados::FechaCreacion)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehiculos_involucrados_siniestro_id")
                            .from(VehiculosInvolucrados::Table, VehiculosInvolucrados::SiniestroId)
                            .to(Siniestros::Table, Siniestros::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vehiculos_involucrados_siniestro_id")
                    .table(VehiculosInvolucrados::Table)
                    .col(VehiculosInvolucrados::SiniestroId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VehiculosInvolucrados::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Siniestros::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum Siniestros {
    Table,
    Id,
    FechaHora,
    DepartamentoId,
    CiudadId,
    TipoSiniestroId,
    NumeroVictimas,
    Descripcion,
    FechaCreacion,
    FechaModificacion,
}

#[derive(DeriveIden)]
enum VehiculosInvolucrados {
    Table,
    Id,
    SiniestroId,
    Tipo,
    Placa,
    Marca,
    Modelo,
    FechaCreacion,
}
