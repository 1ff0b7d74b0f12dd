//! Abstracción del almacén de documentos
//!
//! Cada entidad vive en su propia colección como un documento JSON con un
//! identificador UUID. Los repositorios reciben un `SharedStore` inyectado,
//! nunca una conexión global.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::utils::errors::AppResult;

/// Colecciones conocidas por el sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Students,
    Drivers,
    Vehicles,
    Routes,
    Trips,
    Attendance,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Students,
        Collection::Drivers,
        Collection::Vehicles,
        Collection::Routes,
        Collection::Trips,
        Collection::Attendance,
    ];

    /// Nombre de la tabla / colección en el almacén
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Students => "students",
            Collection::Drivers => "drivers",
            Collection::Vehicles => "vehicles",
            Collection::Routes => "routes",
            Collection::Trips => "trips",
            Collection::Attendance => "attendance",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Predicado sobre los campos de un documento.
///
/// Los nombres de campo son siempre constantes del código, nunca entrada
/// del usuario.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Sin restricción
    All,
    /// Igualdad exacta (enums, booleanos, números, referencias)
    Eq(&'static str, Value),
    /// Subcadena sin distinguir mayúsculas
    ContainsCi(&'static str, String),
    /// Campo mayor o igual (fechas ISO, números)
    Gte(&'static str, Value),
    /// Campo menor o igual
    Lte(&'static str, Value),
    /// Campo de texto presente y no vacío
    NotEmpty(&'static str),
    /// Identificador del documento dentro del conjunto
    IdIn(Vec<Uuid>),
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

impl Filter {
    /// Conjunción que colapsa los casos triviales
    pub fn all_of(filters: Vec<Filter>) -> Filter {
        let mut filters: Vec<Filter> = filters.into_iter().filter(|f| *f != Filter::All).collect();
        match filters.len() {
            0 => Filter::All,
            1 => filters.remove(0),
            _ => Filter::And(filters),
        }
    }

    pub fn eq(field: &'static str, value: impl Into<Value>) -> Filter {
        Filter::Eq(field, value.into())
    }

    pub fn contains(field: &'static str, needle: impl Into<String>) -> Filter {
        Filter::ContainsCi(field, needle.into())
    }

    /// Busca el texto en cualquiera de los campos indicados
    pub fn text_in(fields: &[&'static str], needle: &str) -> Filter {
        Filter::Or(fields.iter().map(|field| Filter::contains(*field, needle)).collect())
    }
}

/// Operaciones de almacenamiento sobre una colección de documentos.
///
/// Cada operación es independiente: no hay transacciones entre llamadas y
/// los fallos de conexión se propagan como `AppError::StoreUnavailable`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persistir un documento nuevo
    async fn insert(&self, collection: Collection, id: Uuid, doc: Value) -> AppResult<()>;

    /// Buscar un documento por identificador
    async fn find_by_id(&self, collection: Collection, id: Uuid) -> AppResult<Option<Value>>;

    /// Documentos que cumplen el filtro, en orden de almacenamiento
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        skip: u64,
        limit: Option<u64>,
    ) -> AppResult<Vec<Value>>;

    /// Número de documentos que cumplen el filtro
    async fn count(&self, collection: Collection, filter: &Filter) -> AppResult<u64>;

    /// Sobrescribir solo los campos indicados; devuelve si algún documento coincidió
    async fn update_fields(
        &self,
        collection: Collection,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> AppResult<bool>;

    /// Eliminar un documento; devuelve si existía
    async fn delete(&self, collection: Collection, id: Uuid) -> AppResult<bool>;

    /// Comprobar que el almacén responde
    async fn ping(&self) -> AppResult<()>;
}

pub type SharedStore = Arc<dyn DocumentStore>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_of_collapses() {
        assert_eq!(Filter::all_of(vec![]), Filter::All);
        assert_eq!(Filter::all_of(vec![Filter::All, Filter::All]), Filter::All);
        assert_eq!(
            Filter::all_of(vec![Filter::All, Filter::eq("active", true)]),
            Filter::Eq("active", json!(true))
        );
        assert!(matches!(
            Filter::all_of(vec![Filter::eq("a", 1), Filter::eq("b", 2)]),
            Filter::And(v) if v.len() == 2
        ));
    }

    #[test]
    fn test_collection_names_are_unique() {
        let mut names: Vec<_> = Collection::ALL.iter().map(|c| c.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Collection::ALL.len());
    }
}
