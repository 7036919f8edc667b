//! API handlers for Clubhouse REST endpoints

pub mod activity;
pub mod auth;
pub mod branches;
pub mod equipment;
pub mod health;
pub mod openapi;
pub mod payments;
pub mod storage;
pub mod students;
pub mod trainings;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    Json,
};
use serde::Serialize;

use crate::{error::AppError, models::user::UserClaims, AppState};

/// Success envelope. Callers branch on `success`, mirroring the failure
/// shape produced by `AppError`.
#[derive(Serialize)]
pub struct ApiData<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiData<T> {
    pub fn json(data: T) -> Json<Self> {
        Json(Self { success: true, data })
    }
}

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Get the Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        // Check for Bearer token
        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Authentication("Invalid authorization header format".to_string()));
        }

        let token = &auth_header[7..];

        // Validate JWT token using the secret from configuration
        let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}
