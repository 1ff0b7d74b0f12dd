//! Middleware del sistema
//!
//! Este módulo contiene la extracción del token de acceso y la
//! configuración de CORS.

pub mod auth;
pub mod cors;

pub use auth::BearerToken;
pub use cors::cors_layer;
