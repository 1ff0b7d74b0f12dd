//! Services module
//!
//! Este módulo contiene la lógica de negocio que involucra varios
//! repositorios: autenticación, informes y paginación.

pub mod auth_service;
pub mod pagination;
pub mod password;
pub mod report_service;

pub use auth_service::AuthService;
pub use pagination::Page;
pub use password::PasswordHasher;
pub use report_service::ReportService;
