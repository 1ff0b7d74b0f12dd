//! Routers HTTP
//!
//! Un router por entidad bajo `/api/v1`, más la raíz y el health check.

pub mod attendance_routes;
pub mod auth_routes;
pub mod crud;
pub mod driver_routes;
pub mod route_routes;
pub mod student_routes;
pub mod trip_routes;
pub mod vehicle_routes;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use tracing::error;

use crate::state::AppState;

pub const API_PREFIX: &str = "/api/v1";

/// Router completo de la API (sin capas)
pub fn create_api_router() -> Router<AppState> {
    let api = Router::new()
        .nest("/auth", auth_routes::create_auth_router())
        .nest("/students", student_routes::create_student_router())
        .nest("/drivers", driver_routes::create_driver_router())
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/routes", route_routes::create_route_router())
        .nest("/trips", trip_routes::create_trip_router())
        .nest("/attendance", attendance_routes::create_attendance_router());

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest(API_PREFIX, api)
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "RotaFácil API",
        "version": env!("CARGO_PKG_VERSION"),
        "docs": API_PREFIX,
    }))
}

/// Health check: comprueba que el almacén responde
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "timestamp": chrono::Utc::now().to_rfc3339(),
            })),
        ),
        Err(e) => {
            error!("❌ Health check fallido: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "error": e.to_string(),
                })),
            )
        }
    }
}
