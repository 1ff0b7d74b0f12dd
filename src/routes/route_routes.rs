use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use validator::Validate;

use crate::dto::TextQuery;
use crate::models::route::RouteFilters;
use crate::models::Route;
use crate::routes::crud::crud_router;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_routes))
        .route("/search/text", get(text_search_routes))
        .route("/active", get(active_routes))
        .route("/shift/:shift", get(routes_by_shift))
        .route("/by-stops", get(routes_by_stop_count))
        .merge(crud_router::<Route>())
}

async fn search_routes(
    State(state): State<AppState>,
    Query(filters): Query<RouteFilters>,
) -> AppResult<Json<Vec<Route>>> {
    Ok(Json(state.routes.search(&filters).await?))
}

async fn text_search_routes(
    State(state): State<AppState>,
    Query(query): Query<TextQuery>,
) -> AppResult<Json<Vec<Route>>> {
    query.validate()?;
    Ok(Json(state.routes.text_search(&query.q).await?))
}

async fn active_routes(State(state): State<AppState>) -> AppResult<Json<Vec<Route>>> {
    Ok(Json(state.routes.active().await?))
}

async fn routes_by_shift(
    State(state): State<AppState>,
    Path(shift): Path<String>,
) -> AppResult<Json<Vec<Route>>> {
    Ok(Json(state.routes.by_shift(&shift).await?))
}

async fn routes_by_stop_count(State(state): State<AppState>) -> AppResult<Json<Vec<Route>>> {
    Ok(Json(state.routes.by_stop_count().await?))
}
