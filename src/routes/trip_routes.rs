use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::dto::PeriodQuery;
use crate::models::trip::TripFilters;
use crate::models::{Student, StudentResponse, Trip, TripDetail, TripStatus, TripSummary};
use crate::routes::crud::{crud_router, respond_all};
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::validation::parse_id;

pub fn create_trip_router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_trips))
        .route("/today", get(trips_today))
        .route("/period", get(trips_in_period))
        .route("/status/:status", get(trips_by_status))
        .route("/driver/:driver_id", get(trips_by_driver))
        .route("/route/:route_id", get(trips_by_route))
        .route("/:id/detail", get(trip_detail))
        .route("/:id/students", get(trip_students))
        .merge(crud_router::<Trip>())
}

async fn search_trips(
    State(state): State<AppState>,
    Query(filters): Query<TripFilters>,
) -> AppResult<Json<Vec<Trip>>> {
    Ok(Json(state.trips.search(&filters).await?))
}

async fn trips_today(State(state): State<AppState>) -> AppResult<Json<Vec<Trip>>> {
    Ok(Json(state.trips.today().await?))
}

async fn trips_in_period(
    State(state): State<AppState>,
    Query(period): Query<PeriodQuery>,
) -> AppResult<Json<Vec<TripSummary>>> {
    let summaries = state
        .reports
        .trips_in_period(period.start_date, period.end_date)
        .await?;
    Ok(Json(summaries))
}

async fn trips_by_status(
    State(state): State<AppState>,
    Path(status): Path<TripStatus>,
) -> AppResult<Json<Vec<Trip>>> {
    Ok(Json(state.trips.by_status(status).await?))
}

async fn trips_by_driver(
    State(state): State<AppState>,
    Path(driver_id): Path<String>,
) -> AppResult<Json<Vec<Trip>>> {
    let driver_id = parse_id(&driver_id)?;
    Ok(Json(state.trips.by_driver(driver_id).await?))
}

async fn trips_by_route(
    State(state): State<AppState>,
    Path(route_id): Path<String>,
) -> AppResult<Json<Vec<Trip>>> {
    let route_id = parse_id(&route_id)?;
    Ok(Json(state.trips.by_route(route_id).await?))
}

async fn trip_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<TripDetail>> {
    let trip_id = parse_id(&id)?;
    Ok(Json(state.reports.trip_detail(trip_id).await?))
}

async fn trip_students(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<StudentResponse>>> {
    let trip_id = parse_id(&id)?;
    let students = state.reports.students_for_trip(trip_id).await?;
    Ok(respond_all::<Student>(students))
}
