use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use validator::Validate;

use crate::dto::TextQuery;
use crate::models::student::StudentFilters;
use crate::models::{Student, StudentResponse, Trip};
use crate::routes::crud::{crud_router, respond_all};
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::validation::parse_id;

pub fn create_student_router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_students))
        .route("/search/text", get(text_search_students))
        .route("/special-needs", get(students_with_special_needs))
        .route("/boarding-point/:point_id", get(students_by_boarding_point))
        .route("/:id/trips", get(student_trips))
        .merge(crud_router::<Student>())
}

async fn search_students(
    State(state): State<AppState>,
    Query(filters): Query<StudentFilters>,
) -> AppResult<Json<Vec<StudentResponse>>> {
    let students = state.students.search(&filters).await?;
    Ok(respond_all(students))
}

async fn text_search_students(
    State(state): State<AppState>,
    Query(query): Query<TextQuery>,
) -> AppResult<Json<Vec<StudentResponse>>> {
    query.validate()?;
    let students = state.students.text_search(&query.q).await?;
    Ok(respond_all(students))
}

async fn students_with_special_needs(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<StudentResponse>>> {
    let students = state.students.with_special_needs().await?;
    Ok(respond_all(students))
}

async fn students_by_boarding_point(
    State(state): State<AppState>,
    Path(point_id): Path<String>,
) -> AppResult<Json<Vec<StudentResponse>>> {
    let point_id = parse_id(&point_id)?;
    let students = state.students.by_boarding_point(point_id).await?;
    Ok(respond_all(students))
}

/// Viajes en los que el alumno tiene registro de asistencia
async fn student_trips(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Trip>>> {
    let student_id = parse_id(&id)?;
    let trips = state.trips.for_student(student_id).await?;
    Ok(Json(trips))
}
