use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::models::attendance::AttendanceFilters;
use crate::models::Attendance;
use crate::routes::crud::crud_router;
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::validation::parse_id;

pub fn create_attendance_router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_attendance))
        .route("/trip/:trip_id", get(attendance_by_trip))
        .merge(crud_router::<Attendance>())
}

async fn search_attendance(
    State(state): State<AppState>,
    Query(filters): Query<AttendanceFilters>,
) -> AppResult<Json<Vec<Attendance>>> {
    Ok(Json(state.attendance.search(&filters).await?))
}

async fn attendance_by_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> AppResult<Json<Vec<Attendance>>> {
    let trip_id = parse_id(&trip_id)?;
    Ok(Json(state.attendance.by_trip(trip_id).await?))
}
