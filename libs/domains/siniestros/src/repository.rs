use async_trait::async_trait;
use domain_catalogos::{Catalogo, InMemoryCatalogoRepository};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{SiniestroError, SiniestroResult};
use crate::models::{Siniestro, SiniestroDetalle, SiniestroFilter};

/// Persistence port for the incident aggregate.
///
/// `list` orders by `fecha_hora` descending, then by id descending, so pages
/// are stable when timestamps tie.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SiniestroRepository: Send + Sync {
    /// Persist the incident and its vehicles as one unit; returns the id.
    async fn create(&self, siniestro: Siniestro) -> SiniestroResult<Uuid>;

    async fn get_by_id(&self, id: Uuid) -> SiniestroResult<Option<SiniestroDetalle>>;

    /// One page of incidents matching the filter
    async fn list(&self, filter: &SiniestroFilter) -> SiniestroResult<Vec<SiniestroDetalle>>;

    /// Matches for the filter, ignoring the page window
    async fn count(&self, filter: &SiniestroFilter) -> SiniestroResult<u64>;

    /// Write back the mutable fields of an existing incident
    async fn update(&self, siniestro: &Siniestro) -> SiniestroResult<()>;
}

/// In-memory implementation of SiniestroRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemorySiniestroRepository {
    siniestros: Arc<RwLock<HashMap<Uuid, Siniestro>>>,
    catalogos: InMemoryCatalogoRepository,
}

impl InMemorySiniestroRepository {
    pub fn new(catalogos: InMemoryCatalogoRepository) -> Self {
        Self {
            siniestros: Arc::new(RwLock::new(HashMap::new())),
            catalogos,
        }
    }

    async fn detalle(&self, siniestro: Siniestro) -> SiniestroResult<SiniestroDetalle> {
        let departamento = self
            .catalogos
            .departamento(siniestro.departamento_id)
            .await
            .ok_or(SiniestroError::InvalidReference {
                catalogo: Catalogo::Departamento,
                id: siniestro.departamento_id,
            })?;
        let ciudad = self
            .catalogos
            .ciudad(siniestro.ciudad_id)
            .await
            .ok_or(SiniestroError::InvalidReference {
                catalogo: Catalogo::Ciudad,
                id: siniestro.ciudad_id,
            })?;
        let tipo_siniestro = self
            .catalogos
            .tipo_siniestro(siniestro.tipo_siniestro_id)
            .await
            .ok_or(SiniestroError::InvalidReference {
                catalogo: Catalogo::TipoSiniestro,
                id: siniestro.tipo_siniestro_id,
            })?;

        Ok(SiniestroDetalle {
            siniestro,
            departamento,
            ciudad,
            tipo_siniestro,
        })
    }
}

#[async_trait]
impl SiniestroRepository for InMemorySiniestroRepository {
    async fn create(&self, siniestro: Siniestro) -> SiniestroResult<Uuid> {
        // Same rejection the foreign keys give in PostgreSQL
        let detalle = self.detalle(siniestro).await?;
        let id = detalle.siniestro.id;

        self.siniestros.write().await.insert(id, detalle.siniestro);
        Ok(id)
    }

    async fn get_by_id(&self, id: Uuid) -> SiniestroResult<Option<SiniestroDetalle>> {
        let siniestro = self.siniestros.read().await.get(&id).cloned();
        match siniestro {
            Some(siniestro) => Ok(Some(self.detalle(siniestro).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self, filter: &SiniestroFilter) -> SiniestroResult<Vec<SiniestroDetalle>> {
        let mut page: Vec<Siniestro> = {
            let siniestros = self.siniestros.read().await;
            siniestros
                .values()
                .filter(|s| filter.matches(s))
                .cloned()
                .collect()
        };
        page.sort_by_key(|s| Reverse((s.fecha_hora, s.id)));

        let mut detalles = Vec::new();
        for siniestro in page
            .into_iter()
            .skip(filter.offset() as usize)
            .take(filter.page_size as usize)
        {
            detalles.push(self.detalle(siniestro).await?);
        }
        Ok(detalles)
    }

    async fn count(&self, filter: &SiniestroFilter) -> SiniestroResult<u64> {
        let siniestros = self.siniestros.read().await;
        Ok(siniestros.values().filter(|s| filter.matches(s)).count() as u64)
    }

    async fn update(&self, siniestro: &Siniestro) -> SiniestroResult<()> {
        let mut siniestros = self.siniestros.write().await;
        let stored = siniestros
            .get_mut(&siniestro.id)
            .ok_or(SiniestroError::NotFound(siniestro.id))?;

        stored.descripcion = siniestro.descripcion.clone();
        stored.numero_victimas = siniestro.numero_victimas;
        stored.fecha_modificacion = siniestro.fecha_modificacion;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use domain_catalogos::{Ciudad, Departamento, TipoSiniestro};

    fn catalogos() -> InMemoryCatalogoRepository {
        InMemoryCatalogoRepository::with_lookups(
            [
                Departamento::new(5, "Antioquia", Some("05".into())),
                Departamento::new(76, "Valle del Cauca", Some("76".into())),
            ],
            [
                Ciudad::new(1, "Medellín", 5, Some("05001".into())),
                Ciudad::new(2, "Cali", 76, Some("76001".into())),
            ],
            [TipoSiniestro::new(1, "Choque", None)],
        )
    }

    fn siniestro(departamento_id: i32, hace_horas: i64) -> Siniestro {
        let ciudad_id = if departamento_id == 5 { 1 } else { 2 };
        Siniestro::new(
            Utc::now() - Duration::hours(hace_horas),
            departamento_id,
            ciudad_id,
            1,
            0,
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_lookup() {
        let repo = InMemorySiniestroRepository::new(catalogos());
        let mut s = siniestro(5, 1);
        s.ciudad_id = 999;

        let err = repo.create(s).await.unwrap_err();
        assert!(matches!(
            err,
            SiniestroError::InvalidReference {
                catalogo: Catalogo::Ciudad,
                id: 999
            }
        ));
        assert_eq!(repo.count(&SiniestroFilter::default()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_orders_most_recent_first_and_pages() {
        let repo = InMemorySiniestroRepository::new(catalogos());
        for horas in [5, 1, 3] {
            repo.create(siniestro(5, horas)).await.unwrap();
        }

        let filter = SiniestroFilter {
            page_size: 2,
            ..Default::default()
        };
        let first = repo.list(&filter).await.unwrap();
        assert_eq!(first.len(), 2);
        assert!(first[0].siniestro.fecha_hora > first[1].siniestro.fecha_hora);

        let second = repo
            .list(&SiniestroFilter {
                page_number: 2,
                ..filter.clone()
            })
            .await
            .unwrap();
        assert_eq!(second.len(), 1);
        assert!(second[0].siniestro.fecha_hora < first[1].siniestro.fecha_hora);
    }

    #[tokio::test]
    async fn test_equal_timestamps_tie_break_on_id() {
        let repo = InMemorySiniestroRepository::new(catalogos());
        let base = siniestro(5, 1);
        let a = base.clone().with_id(Uuid::from_u128(1));
        let b = base.with_id(Uuid::from_u128(2));
        repo.create(a).await.unwrap();
        repo.create(b).await.unwrap();

        let ids: Vec<_> = repo
            .list(&SiniestroFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.siniestro.id)
            .collect();
        assert_eq!(ids, vec![Uuid::from_u128(2), Uuid::from_u128(1)]);
    }

    #[tokio::test]
    async fn test_count_respects_department_filter() {
        let repo = InMemorySiniestroRepository::new(catalogos());
        repo.create(siniestro(5, 1)).await.unwrap();
        repo.create(siniestro(76, 2)).await.unwrap();
        repo.create(siniestro(76, 3)).await.unwrap();

        let filter = SiniestroFilter {
            departamento_id: Some(76),
            ..Default::default()
        };
        assert_eq!(repo.count(&filter).await.unwrap(), 2);
        assert!(
            repo.list(&filter)
                .await
                .unwrap()
                .iter()
                .all(|d| d.departamento.id == 76)
        );
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found() {
        let repo = InMemorySiniestroRepository::new(catalogos());
        let err = repo.update(&siniestro(5, 1)).await.unwrap_err();
        assert!(matches!(err, SiniestroError::NotFound(_)));
    }
}
