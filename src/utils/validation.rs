//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos en el borde HTTP.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::utils::errors::{validation_error, AppError, AppResult};

/// Convertir un identificador externo (string) al tipo interno
pub fn parse_id(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value.trim()).map_err(|_| AppError::InvalidIdentifier(value.to_string()))
}

/// Convertir un identificador opcional (filtros de búsqueda)
pub fn parse_optional_id(value: Option<&str>) -> AppResult<Option<Uuid>> {
    value.map(parse_id).transpose()
}

/// Validar que un periodo no esté invertido
pub fn validate_period(start: NaiveDate, end: NaiveDate) -> AppResult<()> {
    if start > end {
        return Err(validation_error(
            "start_date",
            "period",
            "start_date must not be after end_date",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let valid = "550e8400-e29b-41d4-a716-446655440000";
        assert!(parse_id(valid).is_ok());

        let invalid = parse_id("invalid-id");
        assert!(matches!(invalid, Err(AppError::InvalidIdentifier(v)) if v == "invalid-id"));
    }

    #[test]
    fn test_parse_optional_id() {
        assert!(parse_optional_id(None).unwrap().is_none());
        assert!(parse_optional_id(Some("nope")).is_err());
    }

    #[test]
    fn test_validate_period() {
        let a = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        assert!(validate_period(a, b).is_ok());
        assert!(validate_period(a, a).is_ok());
        assert!(matches!(validate_period(b, a), Err(AppError::Validation(_))));
    }
}
