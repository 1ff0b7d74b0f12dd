use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use validator::Validate;

use crate::dto::TextQuery;
use crate::models::driver::DriverFilters;
use crate::models::{Driver, DriverResponse};
use crate::routes::crud::{crud_router, respond_all};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_drivers))
        .route("/search/text", get(text_search_drivers))
        .route("/active", get(active_drivers))
        .route("/inactive", get(inactive_drivers))
        .merge(crud_router::<Driver>())
}

async fn search_drivers(
    State(state): State<AppState>,
    Query(filters): Query<DriverFilters>,
) -> AppResult<Json<Vec<DriverResponse>>> {
    let drivers = state.drivers.search(&filters).await?;
    Ok(respond_all(drivers))
}

async fn text_search_drivers(
    State(state): State<AppState>,
    Query(query): Query<TextQuery>,
) -> AppResult<Json<Vec<DriverResponse>>> {
    query.validate()?;
    let drivers = state.drivers.text_search(&query.q).await?;
    Ok(respond_all(drivers))
}

async fn active_drivers(State(state): State<AppState>) -> AppResult<Json<Vec<DriverResponse>>> {
    Ok(respond_all(state.drivers.by_active(true).await?))
}

async fn inactive_drivers(State(state): State<AppState>) -> AppResult<Json<Vec<DriverResponse>>> {
    Ok(respond_all(state.drivers.by_active(false).await?))
}
