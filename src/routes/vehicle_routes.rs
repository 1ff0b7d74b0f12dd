use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use validator::Validate;

use crate::dto::TextQuery;
use crate::models::vehicle::VehicleFilters;
use crate::models::{Vehicle, VehicleUsage};
use crate::routes::crud::crud_router;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_vehicles))
        .route("/search/text", get(text_search_vehicles))
        .route("/available", get(available_vehicles))
        .route("/adapted", get(adapted_vehicles))
        .route("/stats", get(vehicle_usage_stats))
        .merge(crud_router::<Vehicle>())
}

async fn search_vehicles(
    State(state): State<AppState>,
    Query(filters): Query<VehicleFilters>,
) -> AppResult<Json<Vec<Vehicle>>> {
    Ok(Json(state.vehicles.search(&filters).await?))
}

async fn text_search_vehicles(
    State(state): State<AppState>,
    Query(query): Query<TextQuery>,
) -> AppResult<Json<Vec<Vehicle>>> {
    query.validate()?;
    Ok(Json(state.vehicles.text_search(&query.q).await?))
}

async fn available_vehicles(State(state): State<AppState>) -> AppResult<Json<Vec<Vehicle>>> {
    Ok(Json(state.vehicles.available().await?))
}

async fn adapted_vehicles(State(state): State<AppState>) -> AppResult<Json<Vec<Vehicle>>> {
    Ok(Json(state.vehicles.adapted().await?))
}

async fn vehicle_usage_stats(State(state): State<AppState>) -> AppResult<Json<Vec<VehicleUsage>>> {
    Ok(Json(state.reports.vehicle_usage_stats().await?))
}
