//! DTOs comunes de la API
//!
//! Parámetros de query y respuestas genéricas compartidas por todos los
//! routers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::pagination::DEFAULT_PAGE_LIMIT;

/// `?skip=&limit=` de los listados
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: u64,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u64>,
}

/// `?page=&limit=` de la paginación (página base 0)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PageQuery {
    #[serde(default)]
    pub page: u64,

    #[serde(default = "default_page_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: u64,
}

fn default_page_limit() -> u64 {
    DEFAULT_PAGE_LIMIT
}

/// `?q=` de la búsqueda de texto libre
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TextQuery {
    #[validate(length(min = 1, max = 100))]
    pub q: String,
}

/// `?start_date=&end_date=` (ambas inclusivas)
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_query_defaults() {
        let query: PageQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(query.page, 0);
        assert_eq!(query.limit, DEFAULT_PAGE_LIMIT);
        assert!(query.validate().is_ok());

        let too_big: PageQuery = serde_json::from_value(json!({ "limit": 101 })).unwrap();
        assert!(too_big.validate().is_err());
    }

    #[test]
    fn test_list_query_limit_range() {
        assert!(ListQuery { skip: 0, limit: Some(0) }.validate().is_err());
        assert!(ListQuery { skip: 5, limit: None }.validate().is_ok());
    }
}
