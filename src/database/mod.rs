//! Módulo de base de datos
//!
//! Define el almacén de documentos y sus dos implementaciones
//! (PostgreSQL y memoria).

pub mod memory;
pub mod postgres;
pub mod store;

use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::info;

use crate::config::{DatabaseConfig, EnvironmentConfig, StoreBackend};

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;
pub use store::{Collection, DocumentStore, Filter, SharedStore};

/// Crear el almacén configurado para este proceso
pub async fn connect_store(config: &EnvironmentConfig) -> Result<SharedStore> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let db_config = DatabaseConfig::from_environment(config)
                .ok_or_else(|| anyhow!("DATABASE_URL must be set when STORE_BACKEND=postgres"))?;
            let store = PgDocumentStore::connect(&db_config)
                .await
                .map_err(|e| anyhow!("Error de base de datos: {}", e))?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            info!("🧠 Usando almacén en memoria (los datos se pierden al reiniciar)");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
