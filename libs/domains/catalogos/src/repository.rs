use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CatalogoError, CatalogoResult};
use crate::models::{Catalogo, Ciudad, Departamento, TipoSiniestro};

/// Read access to the lookup tables.
///
/// Every list returns active rows only, ordered by name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogoRepository: Send + Sync {
    async fn tipos_siniestro_activos(&self) -> CatalogoResult<Vec<TipoSiniestro>>;

    async fn departamentos_activos(&self) -> CatalogoResult<Vec<Departamento>>;

    /// Active cities, optionally restricted to one department
    async fn ciudades_activas(&self, departamento_id: Option<i32>) -> CatalogoResult<Vec<Ciudad>>;

    /// Activate or deactivate a lookup row. Rows are never deleted.
    async fn set_activo(&self, catalogo: Catalogo, id: i32, activo: bool) -> CatalogoResult<()>;
}

/// In-memory implementation of CatalogoRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalogoRepository {
    departamentos: Arc<RwLock<BTreeMap<i32, Departamento>>>,
    ciudades: Arc<RwLock<BTreeMap<i32, Ciudad>>>,
    tipos: Arc<RwLock<BTreeMap<i32, TipoSiniestro>>>,
}

impl InMemoryCatalogoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lookups(
        departamentos: impl IntoIterator<Item = Departamento>,
        ciudades: impl IntoIterator<Item = Ciudad>,
        tipos: impl IntoIterator<Item = TipoSiniestro>,
    ) -> Self {
        Self {
            departamentos: Arc::new(RwLock::new(
                departamentos.into_iter().map(|d| (d.id, d)).collect(),
            )),
            ciudades: Arc::new(RwLock::new(ciudades.into_iter().map(|c| (c.id, c)).collect())),
            tipos: Arc::new(RwLock::new(tipos.into_iter().map(|t| (t.id, t)).collect())),
        }
    }

    /// Lookup by id regardless of the active flag.
    pub async fn departamento(&self, id: i32) -> Option<Departamento> {
        self.departamentos.read().await.get(&id).cloned()
    }

    pub async fn ciudad(&self, id: i32) -> Option<Ciudad> {
        self.ciudades.read().await.get(&id).cloned()
    }

    pub async fn tipo_siniestro(&self, id: i32) -> Option<TipoSiniestro> {
        self.tipos.read().await.get(&id).cloned()
    }
}

fn by_nombre<T, K: Ord>(mut items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    items.sort_by_key(|item| key(item));
    items
}

#[async_trait]
impl CatalogoRepository for InMemoryCatalogoRepository {
    async fn tipos_siniestro_activos(&self) -> CatalogoResult<Vec<TipoSiniestro>> {
        let tipos = self.tipos.read().await;
        let activos = tipos.values().filter(|t| t.activo).cloned().collect();
        Ok(by_nombre(activos, |t: &TipoSiniestro| t.nombre.clone()))
    }

    async fn departamentos_activos(&self) -> CatalogoResult<Vec<Departamento>> {
        let departamentos = self.departamentos.read().await;
        let activos = departamentos.values().filter(|d| d.activo).cloned().collect();
        Ok(by_nombre(activos, |d: &Departamento| d.nombre.clone()))
    }

    async fn ciudades_activas(&self, departamento_id: Option<i32>) -> CatalogoResult<Vec<Ciudad>> {
        let ciudades = self.ciudades.read().await;
        let activas = ciudades
            .values()
            .filter(|c| c.activo)
            .filter(|c| departamento_id.is_none_or(|id| c.departamento_id == id))
            .cloned()
            .collect();
        Ok(by_nombre(activas, |c: &Ciudad| c.nombre.clone()))
    }

    async fn set_activo(&self, catalogo: Catalogo, id: i32, activo: bool) -> CatalogoResult<()> {
        let not_found = || CatalogoError::NotFound { catalogo, id };

        match catalogo {
            Catalogo::Departamento => {
                let mut rows = self.departamentos.write().await;
                let row = rows.get_mut(&id).ok_or_else(not_found)?;
                if activo { row.activar() } else { row.desactivar() }
            }
            Catalogo::Ciudad => {
                let mut rows = self.ciudades.write().await;
                let row = rows.get_mut(&id).ok_or_else(not_found)?;
                if activo { row.activar() } else { row.desactivar() }
            }
            Catalogo::TipoSiniestro => {
                let mut rows = self.tipos.write().await;
                let row = rows.get_mut(&id).ok_or_else(not_found)?;
                if activo { row.activar() } else { row.desactivar() }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> InMemoryCatalogoRepository {
        InMemoryCatalogoRepository::with_lookups(
            [
                Departamento::new(2, "Valle del Cauca", Some("76".into())),
                Departamento::new(1, "Antioquia", Some("05".into())),
            ],
            [
                Ciudad::new(10, "Medellín", 1, Some("05001".into())),
                Ciudad::new(11, "Envigado", 1, Some("05266".into())),
                Ciudad::new(20, "Cali", 2, Some("76001".into())),
            ],
            [
                TipoSiniestro::new(1, "Choque", Some("Colisión entre vehículos".into())),
                TipoSiniestro::new(2, "Atropello", None),
            ],
        )
    }

    #[tokio::test]
    async fn test_lists_are_ordered_by_nombre() {
        let repo = repo();
        let nombres: Vec<_> = repo
            .departamentos_activos()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.nombre)
            .collect();
        assert_eq!(nombres, vec!["Antioquia", "Valle del Cauca"]);
    }

    #[tokio::test]
    async fn test_ciudades_filtered_by_departamento() {
        let repo = repo();
        let ciudades = repo.ciudades_activas(Some(1)).await.unwrap();
        assert_eq!(ciudades.len(), 2);
        assert!(ciudades.iter().all(|c| c.departamento_id == 1));

        assert_eq!(repo.ciudades_activas(None).await.unwrap().len(), 3);
        assert!(repo.ciudades_activas(Some(99)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deactivated_rows_are_hidden_but_kept() {
        let repo = repo();
        repo.set_activo(Catalogo::TipoSiniestro, 2, false).await.unwrap();

        let tipos = repo.tipos_siniestro_activos().await.unwrap();
        assert_eq!(tipos.len(), 1);
        assert_eq!(tipos[0].nombre, "Choque");

        let kept = repo.tipo_siniestro(2).await.unwrap();
        assert!(!kept.activo);

        repo.set_activo(Catalogo::TipoSiniestro, 2, true).await.unwrap();
        assert_eq!(repo.tipos_siniestro_activos().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_set_activo_unknown_id() {
        let err = repo()
            .set_activo(Catalogo::Ciudad, 404, false)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogoError::NotFound {
                catalogo: Catalogo::Ciudad,
                id: 404
            }
        ));
    }
}
