use std::sync::Arc;

use crate::error::CatalogoResult;
use crate::models::{Catalogo, CiudadDto, CiudadFilter, DepartamentoDto, TipoSiniestroDto};
use crate::repository::CatalogoRepository;

/// Lookup queries and activation toggles
#[derive(Clone)]
pub struct CatalogoService<R: CatalogoRepository> {
    repository: Arc<R>,
}

impl<R: CatalogoRepository> CatalogoService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn tipos_siniestro(&self) -> CatalogoResult<Vec<TipoSiniestroDto>> {
        let tipos = self.repository.tipos_siniestro_activos().await?;
        Ok(tipos.iter().map(TipoSiniestroDto::from).collect())
    }

    pub async fn departamentos(&self) -> CatalogoResult<Vec<DepartamentoDto>> {
        let departamentos = self.repository.departamentos_activos().await?;
        Ok(departamentos.iter().map(DepartamentoDto::from).collect())
    }

    pub async fn ciudades(&self, filter: CiudadFilter) -> CatalogoResult<Vec<CiudadDto>> {
        let ciudades = self.repository.ciudades_activas(filter.departamento_id).await?;
        tracing::debug!(
            departamento_id = ?filter.departamento_id,
            total = ciudades.len(),
            "Listed cities"
        );
        Ok(ciudades.iter().map(CiudadDto::from).collect())
    }

    pub async fn activar(&self, catalogo: Catalogo, id: i32) -> CatalogoResult<()> {
        self.repository.set_activo(catalogo, id, true).await
    }

    pub async fn desactivar(&self, catalogo: Catalogo, id: i32) -> CatalogoResult<()> {
        self.repository.set_activo(catalogo, id, false).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogoError;
    use crate::models::{Ciudad, Departamento, TipoSiniestro};
    use crate::repository::MockCatalogoRepository;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_departamentos_are_mapped_to_dtos() {
        let mut repo = MockCatalogoRepository::new();
        repo.expect_departamentos_activos()
            .times(1)
            .returning(|| Ok(vec![Departamento::new(5, "Antioquia", Some("05".into()))]));

        let service = CatalogoService::new(repo);
        let dtos = service.departamentos().await.unwrap();

        assert_eq!(
            dtos,
            vec![DepartamentoDto {
                id: 5,
                nombre: "Antioquia".into(),
                codigo_dane: Some("05".into()),
            }]
        );
    }

    #[tokio::test]
    async fn test_ciudades_forwards_department_filter() {
        let mut repo = MockCatalogoRepository::new();
        repo.expect_ciudades_activas()
            .with(eq(Some(76)))
            .times(1)
            .returning(|_| Ok(vec![Ciudad::new(1, "Cali", 76, Some("76001".into()))]));

        let service = CatalogoService::new(repo);
        let dtos = service
            .ciudades(CiudadFilter {
                departamento_id: Some(76),
            })
            .await
            .unwrap();

        assert_eq!(dtos.len(), 1);
        assert_eq!(dtos[0].nombre, "Cali");
    }

    #[tokio::test]
    async fn test_tipos_siniestro_keep_descripcion() {
        let mut repo = MockCatalogoRepository::new();
        repo.expect_tipos_siniestro_activos().returning(|| {
            Ok(vec![TipoSiniestro::new(
                1,
                "Choque",
                Some("Colisión entre vehículos".into()),
            )])
        });

        let dtos = CatalogoService::new(repo).tipos_siniestro().await.unwrap();
        assert_eq!(dtos[0].descripcion.as_deref(), Some("Colisión entre vehículos"));
    }

    #[tokio::test]
    async fn test_desactivar_sets_flag_false() {
        let mut repo = MockCatalogoRepository::new();
        repo.expect_set_activo()
            .with(eq(Catalogo::Departamento), eq(3), eq(false))
            .times(1)
            .returning(|_, _, _| Ok(()));

        CatalogoService::new(repo)
            .desactivar(Catalogo::Departamento, 3)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_repository_errors_propagate() {
        let mut repo = MockCatalogoRepository::new();
        repo.expect_departamentos_activos()
            .returning(|| Err(CatalogoError::Internal("Database error: down".into())));

        let err = CatalogoService::new(repo).departamentos().await.unwrap_err();
        assert!(matches!(err, CatalogoError::Internal(_)));
    }
}
