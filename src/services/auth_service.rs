//! Servicio de autenticación
//!
//! Login de alumnos y conductores con email y contraseña. Se busca primero
//! entre los alumnos y después entre los conductores.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::models::{CreateDriverRequest, CreateStudentRequest, Driver, Student};
use crate::repositories::{DriverRepository, StudentRepository};
use crate::services::password::PasswordHasher;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::jwt::{generate_token, verify_token, JwtConfig, UserKind};
use crate::utils::validation::parse_id;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Datos públicos del usuario autenticado
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub kind: UserKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user_info: UserInfo,
}

impl From<&Student> for UserInfo {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id.to_string(),
            name: student.full_name.clone(),
            email: student.email.clone(),
            kind: UserKind::Student,
        }
    }
}

impl From<&Driver> for UserInfo {
    fn from(driver: &Driver) -> Self {
        Self {
            id: driver.id.to_string(),
            name: driver.full_name.clone(),
            email: driver.email.clone(),
            kind: UserKind::Driver,
        }
    }
}

#[derive(Clone)]
pub struct AuthService {
    students: StudentRepository,
    drivers: DriverRepository,
    hasher: PasswordHasher,
    jwt: JwtConfig,
}

impl AuthService {
    pub fn new(
        students: StudentRepository,
        drivers: DriverRepository,
        hasher: PasswordHasher,
        jwt: JwtConfig,
    ) -> Self {
        Self { students, drivers, hasher, jwt }
    }

    fn issue(&self, user_id: Uuid, user_info: UserInfo) -> AppResult<LoginResponse> {
        let access_token = generate_token(user_id, user_info.kind, &user_info.email, &self.jwt)?;
        Ok(LoginResponse {
            access_token,
            token_type: "bearer".to_string(),
            user_info,
        })
    }

    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        if let Some(student) = self.students.find_by_email(email).await? {
            if self.hasher.verify(password, &student.password_hash) {
                info!("🔐 Login de alumno: {}", student.id);
                return self.issue(student.id, UserInfo::from(&student));
            }
        }

        if let Some(driver) = self.drivers.find_by_email(email).await? {
            if self.hasher.verify(password, &driver.password_hash) {
                info!("🔐 Login de conductor: {}", driver.id);
                return self.issue(driver.id, UserInfo::from(&driver));
            }
        }

        warn!("🔒 Credenciales inválidas para {}", email);
        Err(AppError::Unauthorized("Email o contraseña incorrectos".to_string()))
    }

    /// Registrar un alumno e iniciar sesión con las mismas credenciales
    pub async fn register_student(&self, input: CreateStudentRequest) -> AppResult<LoginResponse> {
        let email = input.email.clone();
        let password = input.password.clone();
        self.students.create(input).await?;
        self.login(&email, &password).await
    }

    pub async fn register_driver(&self, input: CreateDriverRequest) -> AppResult<LoginResponse> {
        let email = input.email.clone();
        let password = input.password.clone();
        self.drivers.create(input).await?;
        self.login(&email, &password).await
    }

    /// Usuario dueño del token; `NotFound` si fue eliminado después de emitirlo
    pub async fn current_user(&self, token: &str) -> AppResult<UserInfo> {
        let claims = verify_token(token, &self.jwt)?;
        let user_id = parse_id(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Token con identificador inválido".to_string()))?;

        match claims.kind {
            UserKind::Student => self
                .students
                .find_by_id(user_id)
                .await?
                .map(|s| UserInfo::from(&s))
                .ok_or_else(|| not_found_error("Student", &claims.sub)),
            UserKind::Driver => self
                .drivers
                .find_by_id(user_id)
                .await?
                .map(|d| UserInfo::from(&d))
                .ok_or_else(|| not_found_error("Driver", &claims.sub)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::{memory_store, repository};
    use chrono::NaiveDate;

    fn service() -> AuthService {
        let store = memory_store();
        AuthService::new(
            repository(&store),
            repository(&store),
            PasswordHasher::new(4),
            JwtConfig { secret: "test-secret".to_string(), expiration: 3600 },
        )
    }

    fn student(email: &str) -> CreateStudentRequest {
        CreateStudentRequest {
            full_name: "Ana Silva".to_string(),
            email: email.to_string(),
            password: "segredo123".to_string(),
            enrollment_code: "2024001".to_string(),
            phone: None,
            special_needs: None,
            preferred_boarding_point_id: None,
        }
    }

    fn driver(email: &str) -> CreateDriverRequest {
        CreateDriverRequest {
            full_name: "Carlos Lima".to_string(),
            email: email.to_string(),
            password: "volante1".to_string(),
            license_number: "CNH001".to_string(),
            admission_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            active: true,
        }
    }

    #[tokio::test]
    async fn test_register_then_login_and_me() {
        let auth = service();
        let registered = auth.register_student(student("ana@escola.edu.br")).await.unwrap();
        assert_eq!(registered.token_type, "bearer");
        assert_eq!(registered.user_info.kind, UserKind::Student);

        let login = auth.login("ana@escola.edu.br", "segredo123").await.unwrap();
        assert_eq!(login.user_info, registered.user_info);

        let me = auth.current_user(&login.access_token).await.unwrap();
        assert_eq!(me, registered.user_info);
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let auth = service();
        auth.register_student(student("ana@escola.edu.br")).await.unwrap();

        let result = auth.login("ana@escola.edu.br", "errada").await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));

        let unknown = auth.login("ninguem@escola.edu.br", "segredo123").await;
        assert!(matches!(unknown, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_rejected() {
        let auth = service();
        auth.register_student(student("dup@escola.edu.br")).await.unwrap();

        let again = CreateStudentRequest { password: "segunda".to_string(), ..student("dup@escola.edu.br") };
        let result = auth.register_student(again).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(auth.students.count().await.unwrap(), 1);

        let login = auth.login("dup@escola.edu.br", "segredo123").await.unwrap();
        assert_eq!(login.user_info.kind, UserKind::Student);

        auth.register_driver(driver("carlos@rotafacil.com")).await.unwrap();
        let driver_again = auth.register_driver(driver("carlos@rotafacil.com")).await;
        assert!(matches!(driver_again, Err(AppError::Conflict(_))));
        assert_eq!(auth.drivers.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_driver_login_when_student_password_differs() {
        let auth = service();
        auth.register_student(student("shared@rotafacil.com")).await.unwrap();
        auth.register_driver(driver("shared@rotafacil.com")).await.unwrap();

        let as_student = auth.login("shared@rotafacil.com", "segredo123").await.unwrap();
        assert_eq!(as_student.user_info.kind, UserKind::Student);

        let as_driver = auth.login("shared@rotafacil.com", "volante1").await.unwrap();
        assert_eq!(as_driver.user_info.kind, UserKind::Driver);
    }

    #[tokio::test]
    async fn test_current_user_deleted_is_not_found() {
        let auth = service();
        let registered = auth.register_driver(driver("carlos@rotafacil.com")).await.unwrap();
        let id = parse_id(&registered.user_info.id).unwrap();
        auth.drivers.delete(id).await.unwrap();

        let result = auth.current_user(&registered.access_token).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let garbage = auth.current_user("not.a.token").await;
        assert!(matches!(garbage, Err(AppError::Jwt(_))));
    }
}
