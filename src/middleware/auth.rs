//! Extracción del token Bearer
//!
//! `BearerToken` toma el token del header Authorization; la verificación y
//! la carga del usuario las hace `AuthService::current_user`.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::utils::{errors::AppError, jwt::extract_token_from_header};

/// Token de acceso presente en la request
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

        let token = extract_token_from_header(auth_header)?;
        Ok(BearerToken(token.to_string()))
    }
}
