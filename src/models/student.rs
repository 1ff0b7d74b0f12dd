//! Modelo de Student
//!
//! Alumno transportado. La contraseña llega en claro en la creación y se
//! guarda solo como hash bcrypt.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use crate::database::Collection;
use crate::models::{patch_fields, Entity};
use crate::services::password::PasswordHasher;
use crate::utils::errors::AppResult;

/// Student principal - documento de la colección students
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub enrollment_code: String,
    pub phone: Option<String>,
    pub special_needs: Option<String>,
    pub preferred_boarding_point_id: Option<Uuid>,
}

/// Request para crear un nuevo alumno
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,

    #[validate(email, length(max = 100))]
    pub email: String,

    #[validate(length(min = 6))]
    pub password: String,

    #[validate(length(min = 1, max = 20))]
    pub enrollment_code: String,

    #[validate(length(max = 15))]
    pub phone: Option<String>,

    #[validate(length(max = 200))]
    pub special_needs: Option<String>,

    pub preferred_boarding_point_id: Option<Uuid>,
}

/// Request para actualizar un alumno existente (solo campos presentes)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateStudentRequest {
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
    pub enrollment_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 15))]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 200))]
    pub special_needs: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_boarding_point_id: Option<Uuid>,
}

/// Response de alumno para la API (sin hash de contraseña)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub enrollment_code: String,
    pub phone: Option<String>,
    pub special_needs: Option<String>,
    pub preferred_boarding_point_id: Option<String>,
}

/// Filtros para búsqueda de alumnos
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentFilters {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Entity for Student {
    const COLLECTION: Collection = Collection::Students;
    const LABEL: &'static str = "Student";

    type Create = CreateStudentRequest;
    type Update = UpdateStudentRequest;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_create(id: Uuid, input: CreateStudentRequest, hasher: &PasswordHasher) -> AppResult<Self> {
        Ok(Self {
            id,
            password_hash: hasher.hash(&input.password)?,
            full_name: input.full_name,
            email: input.email,
            enrollment_code: input.enrollment_code,
            phone: input.phone,
            special_needs: input.special_needs,
            preferred_boarding_point_id: input.preferred_boarding_point_id,
        })
    }

    /// Un email identifica un único login
    fn unique_key(input: &CreateStudentRequest) -> Option<(&'static str, &str)> {
        Some(("email", input.email.as_str()))
    }

    fn unique_key_update(update: &UpdateStudentRequest) -> Option<(&'static str, &str)> {
        update.email.as_deref().map(|email| ("email", email))
    }

    fn patch(update: &UpdateStudentRequest, hasher: &PasswordHasher) -> AppResult<Map<String, Value>> {
        let mut fields = patch_fields(update)?;
        if let Some(password) = &update.password {
            fields.insert("password_hash".to_string(), Value::String(hasher.hash(password)?));
        }
        Ok(fields)
    }
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            id: student.id.to_string(),
            full_name: student.full_name,
            email: student.email,
            enrollment_code: student.enrollment_code,
            phone: student.phone,
            special_needs: student.special_needs,
            preferred_boarding_point_id: student.preferred_boarding_point_id.map(|p| p.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateStudentRequest {
        CreateStudentRequest {
            full_name: "Ana Souza".to_string(),
            email: "ana.souza@escola.edu.br".to_string(),
            password: "segredo123".to_string(),
            enrollment_code: "2024001".to_string(),
            phone: Some("11999990000".to_string()),
            special_needs: None,
            preferred_boarding_point_id: None,
        }
    }

    #[test]
    fn test_create_request_validation() {
        assert!(valid_request().validate().is_ok());

        let bad_email = CreateStudentRequest { email: "ana-at-escola".to_string(), ..valid_request() };
        assert!(bad_email.validate().is_err());

        let short_password = CreateStudentRequest { password: "12345".to_string(), ..valid_request() };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_patch_only_contains_present_fields() {
        let hasher = PasswordHasher::new(4);
        let update = UpdateStudentRequest { phone: Some("1133334444".to_string()), ..Default::default() };
        let fields = Student::patch(&update, &hasher).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["phone"], "1133334444");

        let empty = Student::patch(&UpdateStudentRequest::default(), &hasher).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_patch_rehashes_password() {
        let hasher = PasswordHasher::new(4);
        let update = UpdateStudentRequest { password: Some("nova-senha".to_string()), ..Default::default() };
        let fields = Student::patch(&update, &hasher).unwrap();
        assert!(!fields.contains_key("password"));
        let hashed = fields["password_hash"].as_str().unwrap();
        assert!(hasher.verify("nova-senha", hashed));
    }

    #[test]
    fn test_response_hides_password_hash() {
        let student = Student::from_create(Uuid::new_v4(), valid_request(), &PasswordHasher::new(4)).unwrap();
        let body = serde_json::to_value(StudentResponse::from(student)).unwrap();
        assert!(body.get("password_hash").is_none());
        assert!(body.get("password").is_none());
    }
}
