//! Modelo de Driver

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use crate::database::Collection;
use crate::models::{default_true, patch_fields, Entity};
use crate::services::password::PasswordHasher;
use crate::utils::errors::AppResult;

/// Driver principal - documento de la colección drivers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub license_number: String,
    pub admission_date: NaiveDate,
    pub active: bool,
}

/// Request para crear un nuevo conductor
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,

    #[validate(email, length(max = 100))]
    pub email: String,

    #[validate(length(min = 6))]
    pub password: String,

    #[validate(length(min = 1, max = 20))]
    pub license_number: String,

    pub admission_date: NaiveDate,

    #[serde(default = "default_true")]
    pub active: bool,
}

/// Request para actualizar un conductor existente
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateDriverRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub full_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email, length(max = 100))]
    pub email: Option<String>,

    #[serde(skip_serializing)]
    #[validate(length(min = 6))]
    pub password: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 20))]
    pub license_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Response de conductor para la API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub license_number: String,
    pub admission_date: NaiveDate,
    pub active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DriverFilters {
    pub name: Option<String>,
    pub active: Option<bool>,
}

impl Entity for Driver {
    const COLLECTION: Collection = Collection::Drivers;
    const LABEL: &'static str = "Driver";

    type Create = CreateDriverRequest;
    type Update = UpdateDriverRequest;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_create(id: Uuid, input: CreateDriverRequest, hasher: &PasswordHasher) -> AppResult<Self> {
        Ok(Self {
            id,
            password_hash: hasher.hash(&input.password)?,
            full_name: input.full_name,
            email: input.email,
            license_number: input.license_number,
            admission_date: input.admission_date,
            active: input.active,
        })
    }

    /// Un email identifica un único login
    fn unique_key(input: &CreateDriverRequest) -> Option<(&'static str, &str)> {
        Some(("email", input.email.as_str()))
    }

    fn unique_key_update(update: &UpdateDriverRequest) -> Option<(&'static str, &str)> {
        update.email.as_deref().map(|email| ("email", email))
    }

    fn patch(update: &UpdateDriverRequest, hasher: &PasswordHasher) -> AppResult<Map<String, Value>> {
        let mut fields = patch_fields(update)?;
        if let Some(password) = &update.password {
            fields.insert("password_hash".to_string(), Value::String(hasher.hash(password)?));
        }
        Ok(fields)
    }
}

impl From<Driver> for DriverResponse {
    fn from(driver: Driver) -> Self {
        Self {
            id: driver.id.to_string(),
            full_name: driver.full_name,
            email: driver.email,
            license_number: driver.license_number,
            admission_date: driver.admission_date,
            active: driver.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_active_defaults_to_true() {
        let request: CreateDriverRequest = serde_json::from_value(json!({
            "full_name": "Carlos Lima",
            "email": "carlos@rotafacil.com",
            "password": "volante1",
            "license_number": "CNH12345",
            "admission_date": "2023-02-01"
        }))
        .unwrap();
        assert!(request.active);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_license_number_length() {
        let request: CreateDriverRequest = serde_json::from_value(json!({
            "full_name": "Carlos Lima",
            "email": "carlos@rotafacil.com",
            "password": "volante1",
            "license_number": "",
            "admission_date": "2023-02-01"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_patch_serializes_date_as_iso() {
        let update = UpdateDriverRequest {
            admission_date: NaiveDate::from_ymd_opt(2024, 5, 10),
            active: Some(false),
            ..Default::default()
        };
        let fields = Driver::patch(&update, &PasswordHasher::new(4)).unwrap();
        assert_eq!(fields["admission_date"], "2024-05-10");
        assert_eq!(fields["active"], false);
        assert!(!fields.contains_key("password_hash"));
    }
}
