pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_catalogos;
mod m20250301_000002_create_siniestros;
mod m20250301_000003_seed_catalogos;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_catalogos::Migration),
            Box::new(m20250301_000002_create_siniestros::Migration),
            Box::new(m20250301_000003_seed_catalogos::Migration),
        ]
    }
}
