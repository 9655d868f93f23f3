//! Autenticación JWT
//!
//! `AuthUser` es un extractor: cualquier handler que lo reciba exige un
//! `Authorization: Bearer <token>` válido de un usuario que siga existiendo.
//! Cualquier fallo responde 401 "Unauthorized".

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;
use uuid::Uuid;

use crate::models::User;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token};

/// Usuario autenticado de la petición
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

fn unauthorized() -> AppError {
    AppError::Unauthorized("Unauthorized".to_string())
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(unauthorized)?;

        let token = extract_token_from_header(auth_header)?;
        let claims = verify_token(token, &state.jwt)?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| unauthorized())?;

        let user = state.users.find_by_id(user_id).await?.ok_or_else(|| {
            debug!("Token válido de un usuario que ya no existe: {}", user_id);
            unauthorized()
        })?;

        Ok(AuthUser(user))
    }
}
