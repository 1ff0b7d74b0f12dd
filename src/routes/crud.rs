//! Handlers CRUD genéricos
//!
//! Cada entidad expone el mismo conjunto de operaciones: crear, listar,
//! contar, paginar, obtener, actualizar y eliminar.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use validator::Validate;

use crate::dto::{CountResponse, ListQuery, MessageResponse, PageQuery};
use crate::models::{
    Attendance, Driver, DriverResponse, Entity, Route, Student, StudentResponse, Trip, Vehicle,
};
use crate::repositories::Repository;
use crate::services::pagination::Page;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::validation::parse_id;

/// Entidad expuesta por la API con su repositorio y su representación pública
pub trait CrudResource: Entity + 'static {
    type Response: Serialize + From<Self> + Send;

    fn repository(state: &AppState) -> &Repository<Self>;
}

impl CrudResource for Student {
    type Response = StudentResponse;

    fn repository(state: &AppState) -> &Repository<Self> {
        &state.students
    }
}

impl CrudResource for Driver {
    type Response = DriverResponse;

    fn repository(state: &AppState) -> &Repository<Self> {
        &state.drivers
    }
}

impl CrudResource for Vehicle {
    type Response = Vehicle;

    fn repository(state: &AppState) -> &Repository<Self> {
        &state.vehicles
    }
}

impl CrudResource for Route {
    type Response = Route;

    fn repository(state: &AppState) -> &Repository<Self> {
        &state.routes
    }
}

impl CrudResource for Trip {
    type Response = Trip;

    fn repository(state: &AppState) -> &Repository<Self> {
        &state.trips
    }
}

impl CrudResource for Attendance {
    type Response = Attendance;

    fn repository(state: &AppState) -> &Repository<Self> {
        &state.attendance
    }
}

/// Convertir una lista de entidades a su representación pública
pub fn respond_all<E: CrudResource>(items: Vec<E>) -> Json<Vec<E::Response>> {
    Json(items.into_iter().map(E::Response::from).collect())
}

/// Router con las operaciones comunes de la entidad
pub fn crud_router<E: CrudResource>() -> Router<AppState> {
    Router::new()
        .route("/", get(list::<E>).post(create::<E>))
        .route("/count", get(count::<E>))
        .route("/page", get(page::<E>))
        .route("/:id", get(get_one::<E>).put(update::<E>).delete(delete_one::<E>))
}

async fn create<E: CrudResource>(
    State(state): State<AppState>,
    Json(input): Json<E::Create>,
) -> AppResult<(StatusCode, Json<E::Response>)> {
    input.validate()?;
    let entity = E::repository(&state).create(input).await?;
    Ok((StatusCode::CREATED, Json(entity.into())))
}

async fn list<E: CrudResource>(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<E::Response>>> {
    query.validate()?;
    let items = E::repository(&state).list(query.skip, query.limit).await?;
    Ok(respond_all(items))
}

async fn count<E: CrudResource>(State(state): State<AppState>) -> AppResult<Json<CountResponse>> {
    let total = E::repository(&state).count().await?;
    Ok(Json(CountResponse { total }))
}

async fn page<E: CrudResource>(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<E::Response>>> {
    query.validate()?;
    let page = E::repository(&state).paginate(query.page, query.limit).await?;
    Ok(Json(page.map(E::Response::from)))
}

async fn get_one<E: CrudResource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<E::Response>> {
    let id = parse_id(&id)?;
    let entity = E::repository(&state).get_by_id(id).await?;
    Ok(Json(entity.into()))
}

async fn update<E: CrudResource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<E::Update>,
) -> AppResult<Json<E::Response>> {
    let id = parse_id(&id)?;
    input.validate()?;
    let entity = E::repository(&state).update(id, &input).await?;
    Ok(Json(entity.into()))
}

async fn delete_one<E: CrudResource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let parsed = parse_id(&id)?;
    if !E::repository(&state).delete(parsed).await? {
        return Err(not_found_error(E::LABEL, &id));
    }
    Ok(Json(MessageResponse::new(format!("{} eliminado", E::LABEL))))
}
