use axum::{extract::State, http::StatusCode, routing::{get, post}, Json, Router};
use validator::Validate;

use crate::middleware::BearerToken;
use crate::models::{CreateDriverRequest, CreateStudentRequest};
use crate::services::auth_service::{LoginRequest, LoginResponse, UserInfo};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register/student", post(register_student))
        .route("/register/driver", post(register_driver))
        .route("/me", get(me))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    request.validate()?;
    Ok(Json(state.auth.login(&request.email, &request.password).await?))
}

async fn register_student(
    State(state): State<AppState>,
    Json(request): Json<CreateStudentRequest>,
) -> AppResult<(StatusCode, Json<LoginResponse>)> {
    request.validate()?;
    let response = state.auth.register_student(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn register_driver(
    State(state): State<AppState>,
    Json(request): Json<CreateDriverRequest>,
) -> AppResult<(StatusCode, Json<LoginResponse>)> {
    request.validate()?;
    let response = state.auth.register_driver(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn me(State(state): State<AppState>, BearerToken(token): BearerToken) -> AppResult<Json<UserInfo>> {
    Ok(Json(state.auth.current_user(&token).await?))
}
