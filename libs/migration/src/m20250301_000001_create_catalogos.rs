use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Departamentos::Table)
                    .if_not_exists()
                    .col(pk_auto(Departamentos::Id))
                    .col(string_len(Departamentos::Nombre, 100))
                    .col(string_len_null(Departamentos::CodigoDane, 10))
                    .col(boolean(Departamentos::Activo).default(true))
                    .col(
                        timestamp_with_time_zone(Departamentos::FechaCreacion)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_departamentos_nombre")
                    .table(Departamentos::Table)
                    .col(Departamentos::Nombre)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Ciudades::Table)
                    .if_not_exists()
                    .col(pk_auto(Ciudades::Id))
                    .col(string_len(Ciudades::Nombre, 100))
                    .col(integer(Ciudades::DepartamentoId))
                    .col(string_len_null(Ciudades::CodigoDane, 10))
                    .col(boolean(Ciudades::Activo).default(true))
                    .col(
                        timestamp_with_time_zone(Ciudades::FechaCreacion)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ciudades_departamento_id")
                            .from(Ciudades::Table, Ciudades::DepartamentoId)
                            .to(Departamentos::Table, Departamentos::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // City names repeat across departments, never within one
        manager
            .create_index(
                Index::create()
                    .name("uq_ciudades_departamento_nombre")
                    .table(Ciudades::Table)
                    .col(Ciudades::DepartamentoId)
                    .col(Ciudades::Nombre)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TiposSiniestro::Table)
                    .if_not_exists()
                    .col(pk_auto(TiposSiniestro::Id))
                    .col(string_len(TiposSiniestro::Nombre, 50))
                    .col(string_len_null(TiposSiniestro::Descripcion, 200))
                    .col(boolean(TiposSiniestro::Activo).default(true))
                    .col(
                        timestamp_with_time_zone(TiposSiniestro::FechaCreacion)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TiposSiniestro::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Ciudades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departamentos::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Departamentos {
    Table,
    Id,
    Nombre,
    CodigoDane,
    Activo,
    FechaCreacion,
}

#[derive(DeriveIden)]
pub(crate) enum Ciudades {
    Table,
    Id,
    Nombre,
    DepartamentoId,
    CodigoDane,
    Activo,
    FechaCreacion,
}

#[derive(DeriveIden)]
pub(crate) enum TiposSiniestro {
    Table,
    Id,
    Nombre,
    Descripcion,
    Activo,
    FechaCreacion,
}
