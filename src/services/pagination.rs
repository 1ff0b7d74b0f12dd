//! Paginación genérica sobre cualquier colección
//!
//! Las páginas empiezan en 0. El conteo y la ventana se consultan por
//! separado, sin aislamiento entre ambas lecturas.

use serde::Serialize;
use serde_json::Value;

use crate::database::{Collection, DocumentStore, Filter};
use crate::utils::errors::{validation_error, AppResult};

/// Página de resultados
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub pages: u64,
}

impl<T> Page<T> {
    /// Convertir los elementos conservando los metadatos
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        Ok(Page {
            items: self.items.into_iter().map(f).collect::<Result<Vec<_>, E>>()?,
            total: self.total,
            page: self.page,
            limit: self.limit,
            pages: self.pages,
        })
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            pages: self.pages,
        }
    }
}

pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// Obtener la página `page` (base 0) de los documentos que cumplen el filtro
pub async fn paginate(
    store: &dyn DocumentStore,
    collection: Collection,
    filter: &Filter,
    page: u64,
    limit: u64,
) -> AppResult<Page<Value>> {
    if limit == 0 {
        return Err(validation_error("limit", "range", "limit must be at least 1"));
    }

    let skip = page.saturating_mul(limit);
    let total = store.count(collection, filter).await?;
    let items = store.find(collection, filter, skip, Some(limit)).await?;

    Ok(Page {
        items,
        total,
        page,
        limit,
        pages: total.div_ceil(limit),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::utils::errors::AppError;
    use serde_json::json;
    use uuid::Uuid;

    async fn seeded(n: usize) -> MemoryStore {
        let store = MemoryStore::new();
        for i in 0..n {
            store
                .insert(Collection::Vehicles, Uuid::new_v4(), json!({ "seq": i }))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_pages_over_23_documents() {
        let store = seeded(23).await;

        let first = paginate(&store, Collection::Vehicles, &Filter::All, 0, 10).await.unwrap();
        assert_eq!(first.total, 23);
        assert_eq!(first.pages, 3);
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.items[0]["seq"], 0);

        let last = paginate(&store, Collection::Vehicles, &Filter::All, 2, 10).await.unwrap();
        assert_eq!(last.items.len(), 3);
        assert_eq!(last.items[0]["seq"], 20);

        let beyond = paginate(&store, Collection::Vehicles, &Filter::All, 3, 10).await.unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total, 23);
    }

    #[tokio::test]
    async fn test_empty_collection() {
        let store = MemoryStore::new();
        let page = paginate(&store, Collection::Routes, &Filter::All, 0, 10).await.unwrap();
        assert_eq!(page.total, 0);
        assert_eq!(page.pages, 0);
    }

    #[tokio::test]
    async fn test_zero_limit_is_rejected() {
        let store = seeded(1).await;
        let result = paginate(&store, Collection::Vehicles, &Filter::All, 0, 0).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = Page { items: vec![1, 2], total: 12, page: 1, limit: 2, pages: 6 };
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20]);
        assert_eq!(mapped.pages, 6);
    }
}
