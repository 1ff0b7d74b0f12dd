//! Almacén de documentos sobre PostgreSQL
//!
//! Una tabla por colección: `id UUID`, `seq BIGSERIAL` (orden de inserción)
//! y `doc JSONB` con el cuerpo de la entidad. Los filtros se traducen a SQL
//! sobre la columna JSONB.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::database::{mask_database_url, DatabaseConfig};
use crate::database::store::{Collection, DocumentStore, Filter};
use crate::utils::errors::AppResult;

pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Conectar, aplicar migraciones y devolver el almacén listo
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        info!("🐘 Conectando a PostgreSQL: {}", mask_database_url(&config.url));
        let pool = config.create_pool().await?;
        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Ejecutar migraciones de la base de datos
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!().run(&self.pool).await?;
        info!("✅ Migraciones aplicadas");
        Ok(())
    }
}

/// Escapar comodines de LIKE para buscar la subcadena literal
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn push_filter(qb: &mut QueryBuilder<'static, Postgres>, filter: &Filter) {
    match filter {
        Filter::All => {
            qb.push("TRUE");
        }
        Filter::Eq(field, value) => {
            qb.push("(doc -> ")
                .push_bind(*field)
                .push(") = ")
                .push_bind(value.clone());
        }
        Filter::ContainsCi(field, needle) => {
            qb.push("(doc ->> ")
                .push_bind(*field)
                .push(") ILIKE ")
                .push_bind(like_pattern(needle));
        }
        Filter::Gte(field, value) => {
            qb.push("(doc -> ")
                .push_bind(*field)
                .push(") >= ")
                .push_bind(value.clone());
        }
        Filter::Lte(field, value) => {
            qb.push("(doc -> ")
                .push_bind(*field)
                .push(") <= ")
                .push_bind(value.clone());
        }
        Filter::NotEmpty(field) => {
            qb.push("COALESCE(doc ->> ")
                .push_bind(*field)
                .push(", '') <> ''");
        }
        Filter::IdIn(ids) => {
            qb.push("id = ANY(").push_bind(ids.clone()).push(")");
        }
        Filter::And(filters) | Filter::Or(filters) => {
            if filters.is_empty() {
                qb.push(if matches!(filter, Filter::And(_)) { "TRUE" } else { "FALSE" });
                return;
            }
            let joiner = if matches!(filter, Filter::And(_)) { " AND " } else { " OR " };
            qb.push("(");
            for (i, inner) in filters.iter().enumerate() {
                if i > 0 {
                    qb.push(joiner);
                }
                push_filter(qb, inner);
            }
            qb.push(")");
        }
    }
}

fn select_query(
    collection: Collection,
    filter: &Filter,
    skip: u64,
    limit: Option<u64>,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT doc FROM {} WHERE ", collection.name()));
    push_filter(&mut qb, filter);
    qb.push(" ORDER BY seq OFFSET ").push_bind(skip as i64);
    if let Some(limit) = limit {
        qb.push(" LIMIT ").push_bind(limit as i64);
    }
    qb
}

fn count_query(collection: Collection, filter: &Filter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {} WHERE ", collection.name()));
    push_filter(&mut qb, filter);
    qb
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(&self, collection: Collection, id: Uuid, doc: Value) -> AppResult<()> {
        sqlx::query(&format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", collection.name()))
            .bind(id)
            .bind(doc)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, collection: Collection, id: Uuid) -> AppResult<Option<Value>> {
        let doc = sqlx::query_scalar::<_, Value>(&format!(
            "SELECT doc FROM {} WHERE id = $1",
            collection.name()
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(doc)
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        skip: u64,
        limit: Option<u64>,
    ) -> AppResult<Vec<Value>> {
        let mut qb = select_query(collection, filter, skip, limit);
        debug!("🔍 {}", qb.sql());
        let docs = qb.build_query_scalar::<Value>().fetch_all(&self.pool).await?;
        Ok(docs)
    }

    async fn count(&self, collection: Collection, filter: &Filter) -> AppResult<u64> {
        let mut qb = count_query(collection, filter);
        let total = qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?;
        Ok(total.max(0) as u64)
    }

    async fn update_fields(
        &self,
        collection: Collection,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> AppResult<bool> {
        let result = sqlx::query(&format!(
            "UPDATE {} SET doc = doc || $2 WHERE id = $1",
            collection.name()
        ))
        .bind(id)
        .bind(Value::Object(fields))
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", collection.name()))
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
