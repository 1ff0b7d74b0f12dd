//! Repositorios de entidades
//!
//! Un único `Repository<E>` genérico implementa el contrato CRUD común sobre
//! el almacén de documentos. Las consultas propias de cada entidad viven en
//! bloques `impl Repository<Entidad>` en sus módulos.

pub mod attendance_repository;
pub mod driver_repository;
pub mod route_repository;
pub mod student_repository;
pub mod trip_repository;
pub mod vehicle_repository;

use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;

use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::{DocumentStore, Filter, SharedStore};
use crate::models::Entity;
use crate::services::pagination::{paginate, Page};
use crate::services::password::PasswordHasher;
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};

pub use attendance_repository::AttendanceRepository;
pub use driver_repository::DriverRepository;
pub use route_repository::RouteRepository;
pub use student_repository::StudentRepository;
pub use trip_repository::TripRepository;
pub use vehicle_repository::VehicleRepository;

/// Límite por defecto de listados y búsquedas
pub const DEFAULT_LIST_LIMIT: u64 = 100;

/// Subcadena sin distinguir mayúsculas; un texto vacío no filtra
pub(crate) fn contains_filter(field: &'static str, value: Option<&str>) -> Option<Filter> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| Filter::contains(field, v))
}

/// Texto libre sobre varios campos; un texto en blanco se rechaza en vez de
/// coincidir con todo
pub(crate) fn text_filter(fields: &[&'static str], q: &str) -> AppResult<Filter> {
    let needle = q.trim();
    if needle.is_empty() {
        return Err(validation_error("q", "length", "q must not be blank"));
    }
    Ok(Filter::text_in(fields, needle))
}

pub struct Repository<E> {
    store: SharedStore,
    hasher: PasswordHasher,
    search_limit: u64,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            hasher: self.hasher,
            search_limit: self.search_limit,
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> Repository<E> {
    pub fn new(store: SharedStore, hasher: PasswordHasher) -> Self {
        Self {
            store,
            hasher,
            search_limit: DEFAULT_LIST_LIMIT,
            _entity: PhantomData,
        }
    }

    /// Tope de resultados de `search` y de las consultas auxiliares
    pub fn with_search_limit(mut self, search_limit: u64) -> Self {
        self.search_limit = search_limit.max(1);
        self
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    pub fn search_limit(&self) -> u64 {
        self.search_limit
    }

    fn decode(doc: Value) -> AppResult<E> {
        Ok(serde_json::from_value(doc)?)
    }

    fn decode_all(docs: Vec<Value>) -> AppResult<Vec<E>> {
        docs.into_iter().map(Self::decode).collect()
    }

    /// Rechazar un valor de campo único que ya usa otro documento
    async fn ensure_unique(&self, key: Option<(&'static str, &str)>, owner: Option<Uuid>) -> AppResult<()> {
        let Some((field, value)) = key else {
            return Ok(());
        };
        let docs = self
            .store
            .find(E::COLLECTION, &Filter::eq(field, value), 0, Some(2))
            .await?;
        for existing in Self::decode_all(docs)? {
            if Some(existing.id()) != owner {
                return Err(AppError::Conflict(format!(
                    "{} con {} '{}' ya existe",
                    E::LABEL,
                    field,
                    value
                )));
            }
        }
        Ok(())
    }

    /// Crear una entidad con identificador nuevo
    pub async fn create(&self, input: E::Create) -> AppResult<E> {
        self.ensure_unique(E::unique_key(&input), None).await?;
        let entity = E::from_create(Uuid::new_v4(), input, &self.hasher)?;
        let doc = serde_json::to_value(&entity)?;
        self.store.insert(E::COLLECTION, entity.id(), doc).await?;
        info!("✅ {} creado: {}", E::LABEL, entity.id());
        Ok(entity)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<E>> {
        self.store
            .find_by_id(E::COLLECTION, id)
            .await?
            .map(Self::decode)
            .transpose()
    }

    /// Obtener una entidad o `NotFound`
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<E> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error(E::LABEL, &id.to_string()))
    }

    /// Listar en orden de almacenamiento
    pub async fn list(&self, skip: u64, limit: Option<u64>) -> AppResult<Vec<E>> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT);
        let docs = self.store.find(E::COLLECTION, &Filter::All, skip, Some(limit)).await?;
        Self::decode_all(docs)
    }

    /// Documentos que cumplen el filtro, limitados por `search_limit`
    pub async fn find_where(&self, filter: &Filter) -> AppResult<Vec<E>> {
        debug!("🔍 Buscando en {}: {:?}", E::COLLECTION, filter);
        let docs = self
            .store
            .find(E::COLLECTION, filter, 0, Some(self.search_limit))
            .await?;
        Self::decode_all(docs)
    }

    /// Todos los documentos que cumplen el filtro, sin tope (agregaciones)
    pub async fn find_all_where(&self, filter: &Filter) -> AppResult<Vec<E>> {
        let docs = self.store.find(E::COLLECTION, filter, 0, None).await?;
        Self::decode_all(docs)
    }

    /// Entidades indexadas por id; los ids inexistentes simplemente no aparecen
    pub async fn find_by_ids(&self, ids: impl IntoIterator<Item = Uuid>) -> AppResult<HashMap<Uuid, E>> {
        let ids: Vec<Uuid> = ids.into_iter().collect::<HashSet<_>>().into_iter().collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        Ok(self
            .find_all_where(&Filter::IdIn(ids))
            .await?
            .into_iter()
            .map(|entity| (entity.id(), entity))
            .collect())
    }

    pub async fn find_one(&self, filter: &Filter) -> AppResult<Option<E>> {
        let mut docs = self.store.find(E::COLLECTION, filter, 0, Some(1)).await?;
        docs.pop().map(Self::decode).transpose()
    }

    /// Aplicar solo los campos presentes en la actualización.
    ///
    /// Una actualización vacía devuelve la entidad actual sin escribir.
    pub async fn update(&self, id: Uuid, update: &E::Update) -> AppResult<E> {
        self.ensure_unique(E::unique_key_update(update), Some(id)).await?;
        let fields = E::patch(update, &self.hasher)?;
        if fields.is_empty() {
            return self.get_by_id(id).await;
        }

        let matched = self.store.update_fields(E::COLLECTION, id, fields).await?;
        if !matched {
            return Err(not_found_error(E::LABEL, &id.to_string()));
        }
        info!("✏️ {} actualizado: {}", E::LABEL, id);
        self.get_by_id(id).await
    }

    /// Eliminar; devuelve si el documento existía
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let deleted = self.store.delete(E::COLLECTION, id).await?;
        if deleted {
            info!("🗑️ {} eliminado: {}", E::LABEL, id);
        }
        Ok(deleted)
    }

    pub async fn count(&self) -> AppResult<u64> {
        self.store.count(E::COLLECTION, &Filter::All).await
    }

    /// Página tipada (base 0)
    pub async fn paginate(&self, page: u64, limit: u64) -> AppResult<Page<E>> {
        paginate(self.store.as_ref(), E::COLLECTION, &Filter::All, page, limit)
            .await?
            .try_map(Self::decode)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use super::*;
    use crate::database::MemoryStore;

    pub fn memory_store() -> SharedStore {
        Arc::new(MemoryStore::new())
    }

    pub fn repository<E: Entity>(store: &SharedStore) -> Repository<E> {
        Repository::new(store.clone(), PasswordHasher::new(4))
    }
}
