//! Almacén de documentos en memoria
//!
//! Usado en desarrollo (`STORE_BACKEND=memory`) y en los tests. Conserva el
//! orden de inserción de cada colección.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::store::{Collection, DocumentStore, Filter};
use crate::utils::errors::{AppError, AppResult};

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<(Uuid, Value)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Evaluar un filtro contra un documento
pub(crate) fn matches(filter: &Filter, id: Uuid, doc: &Value) -> bool {
    match filter {
        Filter::All => true,
        Filter::Eq(field, value) => doc.get(*field) == Some(value),
        Filter::ContainsCi(field, needle) => doc
            .get(*field)
            .and_then(Value::as_str)
            .map(|text| text.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(false),
        Filter::Gte(field, value) => doc
            .get(*field)
            .and_then(|current| compare(current, value))
            .map(|ord| ord != Ordering::Less)
            .unwrap_or(false),
        Filter::Lte(field, value) => doc
            .get(*field)
            .and_then(|current| compare(current, value))
            .map(|ord| ord != Ordering::Greater)
            .unwrap_or(false),
        Filter::NotEmpty(field) => doc
            .get(*field)
            .and_then(Value::as_str)
            .map(|text| !text.is_empty())
            .unwrap_or(false),
        Filter::IdIn(ids) => ids.contains(&id),
        Filter::And(filters) => filters.iter().all(|f| matches(f, id, doc)),
        Filter::Or(filters) => filters.iter().any(|f| matches(f, id, doc)),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: Collection, id: Uuid, doc: Value) -> AppResult<()> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();
        if docs.iter().any(|(existing, _)| *existing == id) {
            return Err(AppError::Internal(format!("duplicate id {} in {}", id, collection)));
        }
        docs.push((id, doc));
        Ok(())
    }

    async fn find_by_id(&self, collection: Collection, id: Uuid) -> AppResult<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|(existing, _)| *existing == id))
            .map(|(_, doc)| doc.clone()))
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        skip: u64,
        limit: Option<u64>,
    ) -> AppResult<Vec<Value>> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(&collection) else {
            return Ok(Vec::new());
        };

        let take = limit.map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(docs
            .iter()
            .filter(|(id, doc)| matches(filter, *id, doc))
            .skip(skip as usize)
            .take(take)
            .map(|(_, doc)| doc.clone())
            .collect())
    }

    async fn count(&self, collection: Collection, filter: &Filter) -> AppResult<u64> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|(id, doc)| matches(filter, *id, doc)).count() as u64)
            .unwrap_or(0))
    }

    async fn update_fields(
        &self,
        collection: Collection,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> AppResult<bool> {
        let mut collections = self.collections.write().await;
        let Some(doc) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|(existing, _)| *existing == id))
            .map(|(_, doc)| doc)
        else {
            return Ok(false);
        };

        let object = doc
            .as_object_mut()
            .ok_or_else(|| AppError::Internal(format!("document {} in {} is not an object", id, collection)))?;
        for (key, value) in fields {
            object.insert(key, value);
        }
        Ok(true)
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> AppResult<bool> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|(existing, _)| *existing != id);
        Ok(docs.len() < before)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
