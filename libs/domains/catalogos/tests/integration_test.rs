//! Integration tests for the lookup repository
//!
//! Real PostgreSQL via testcontainers, with the seed migration applied.

use domain_catalogos::*;
use test_utils::{TestDatabase, TestDataBuilder};

#[tokio::test]
async fn test_seeded_lookups_are_listed() {
    let db = TestDatabase::new().await;
    let repo = PgCatalogoRepository::new(db.connection());

    let departamentos = repo.departamentos_activos().await.unwrap();
    assert_eq!(departamentos.len(), 33);
    assert!(
        departamentos
            .iter()
            .any(|d| d.nombre == "Antioquia" && d.codigo_dane.as_deref() == Some("05"))
    );

    let tipos = repo.tipos_siniestro_activos().await.unwrap();
    assert!(tipos.iter().any(|t| t.nombre == "Choque"));

    // Ordered by name
    let nombres: Vec<_> = departamentos.iter().map(|d| d.nombre.clone()).collect();
    let mut sorted = nombres.clone();
    sorted.sort();
    assert_eq!(nombres, sorted);
}

#[tokio::test]
async fn test_ciudades_filter_by_departamento() {
    let db = TestDatabase::new().await;
    let repo = PgCatalogoRepository::new(db.connection());
    let data = TestDataBuilder::from_test_name("ciudades_filter");

    let depto = db
        .insert_departamento(&data.name("depto", "a"), Some("99"))
        .await;
    let uno = db.insert_ciudad(depto, &data.name("ciudad", "1")).await;
    let dos = db.insert_ciudad(depto, &data.name("ciudad", "2")).await;

    let ciudades = repo.ciudades_activas(Some(depto)).await.unwrap();
    let ids: Vec<_> = ciudades.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![uno, dos]);
    assert!(ciudades.iter().all(|c| c.departamento_id == depto));

    let todas = repo.ciudades_activas(None).await.unwrap();
    assert!(todas.len() > ciudades.len());
}

#[tokio::test]
async fn test_deactivation_hides_row_without_deleting() {
    let db = TestDatabase::new().await;
    let repo = PgCatalogoRepository::new(db.connection());
    let data = TestDataBuilder::from_test_name("deactivation");

    let tipo = db.insert_tipo_siniestro(&data.name("tipo", "x")).await;
    let service = CatalogoService::new(repo);

    assert!(service.tipos_siniestro().await.unwrap().iter().any(|t| t.id == tipo));

    service.desactivar(Catalogo::TipoSiniestro, tipo).await.unwrap();
    assert!(!service.tipos_siniestro().await.unwrap().iter().any(|t| t.id == tipo));

    service.activar(Catalogo::TipoSiniestro, tipo).await.unwrap();
    assert!(service.tipos_siniestro().await.unwrap().iter().any(|t| t.id == tipo));
}

#[tokio::test]
async fn test_set_activo_unknown_row_is_not_found() {
    let db = TestDatabase::new().await;
    let repo = PgCatalogoRepository::new(db.connection());

    let err = repo
        .set_activo(Catalogo::Departamento, 999_999, false)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogoError::NotFound { id: 999_999, .. }));
}
