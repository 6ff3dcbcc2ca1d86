//! Handler tests for the lookup endpoints.
//!
//! The real router over an in-memory repository, driven with `oneshot`.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_catalogos::*;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn repository() -> InMemoryCatalogoRepository {
    InMemoryCatalogoRepository::with_lookups(
        [
            Departamento::new(5, "Antioquia", Some("05".into())),
            Departamento::new(76, "Valle del Cauca", Some("76".into())),
        ],
        [
            Ciudad::new(1, "Medellín", 5, Some("05001".into())),
            Ciudad::new(2, "Bello", 5, Some("05088".into())),
            Ciudad::new(3, "Cali", 76, Some("76001".into())),
        ],
        [
            TipoSiniestro::new(1, "Choque", Some("Colisión entre vehículos".into())),
            TipoSiniestro::new(2, "Atropello", Some("Vehículo impacta a un peatón".into())),
        ],
    )
}

async fn get(repo: InMemoryCatalogoRepository, uri: &str) -> axum::response::Response {
    let app = handlers::router(CatalogoService::new(repo));
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_departamentos_returns_dane_codes() {
    let response = get(repository(), "/departamentos").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        body,
        serde_json::json!([
            {"id": 5, "nombre": "Antioquia", "codigoDANE": "05"},
            {"id": 76, "nombre": "Valle del Cauca", "codigoDANE": "76"}
        ])
    );
}

#[tokio::test]
async fn test_tipos_siniestro_shape() {
    let response = get(repository(), "/tipos-siniestro").await;
    assert_eq!(response.status(), StatusCode::OK);

    let tipos: Vec<TipoSiniestroDto> = json_body(response.into_body()).await;
    assert_eq!(tipos.len(), 2);
    assert_eq!(tipos[0].nombre, "Atropello");
    assert!(tipos.iter().all(|t| t.descripcion.is_some()));
}

#[tokio::test]
async fn test_ciudades_without_filter_returns_all_active() {
    let response = get(repository(), "/ciudades").await;
    let ciudades: Vec<CiudadDto> = json_body(response.into_body()).await;
    assert_eq!(ciudades.len(), 3);
}

#[tokio::test]
async fn test_ciudades_filtered_by_departamento() {
    let response = get(repository(), "/ciudades?departamentoId=5").await;
    assert_eq!(response.status(), StatusCode::OK);

    let ciudades: Vec<CiudadDto> = json_body(response.into_body()).await;
    let nombres: Vec<_> = ciudades.iter().map(|c| c.nombre.as_str()).collect();
    assert_eq!(nombres, vec!["Bello", "Medellín"]);
}

#[tokio::test]
async fn test_ciudades_blank_departamento_is_unfiltered() {
    let response = get(repository(), "/ciudades?departamentoId=").await;
    assert_eq!(response.status(), StatusCode::OK);

    let ciudades: Vec<CiudadDto> = json_body(response.into_body()).await;
    assert_eq!(ciudades.len(), 3);
}

#[tokio::test]
async fn test_ciudades_rejects_invalid_departamento() {
    let response = get(repository(), "/ciudades?departamentoId=0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["title"], "One or more validation errors occurred");
    assert!(body["errors"]["departamentoId"].is_array());
}

#[tokio::test]
async fn test_deactivated_lookup_disappears() {
    let repo = repository();
    CatalogoService::new(repo.clone())
        .desactivar(Catalogo::Ciudad, 2)
        .await
        .unwrap();

    let response = get(repo, "/ciudades?departamentoId=5").await;
    let ciudades: Vec<CiudadDto> = json_body(response.into_body()).await;
    assert_eq!(ciudades.len(), 1);
    assert_eq!(ciudades[0].nombre, "Medellín");
}
