//! User profile endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUserProfile, Role, UpdateUserProfile, UserProfile},
};

use super::{ApiData, AuthenticatedUser};

/// List user profiles
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Users", body = Vec<UserProfile>)
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<ApiData<Vec<UserProfile>>>> {
    claims.require_admin()?;
    let users = state.services.users.list().await?;
    Ok(ApiData::json(users))
}

/// Get one user profile
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = UserProfile),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiData<UserProfile>>> {
    claims.require_admin()?;
    let user = state.services.users.get_by_id(id).await?;
    Ok(ApiData::json(user))
}

/// Create a user profile
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = CreateUserProfile,
    responses(
        (status = 201, description = "User created", body = UserProfile),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn create_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateUserProfile>,
) -> AppResult<(StatusCode, Json<ApiData<UserProfile>>)> {
    claims.require_admin()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = state.services.users.create(request).await?;
    Ok((StatusCode::CREATED, ApiData::json(user)))
}

/// Update a user profile
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserProfile,
    responses(
        (status = 200, description = "User updated", body = UserProfile),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn update_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateUserProfile>,
) -> AppResult<Json<ApiData<UserProfile>>> {
    claims.require_admin()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = state.services.users.update(id, request).await?;
    Ok(ApiData::json(user))
}

/// Delete a user profile
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiData<()>>> {
    claims.require_admin()?;
    state.services.users.delete(id).await?;
    Ok(ApiData::json(()))
}

/// Role update request
#[derive(Deserialize, ToSchema)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

/// Update a user's role
#[utoipa::path(
    put,
    path = "/users/{id}/role",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = UserProfile),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_role(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateRoleRequest>,
) -> AppResult<Json<ApiData<UserProfile>>> {
    claims.require_admin()?;
    let user = state.services.users.update_role(id, request.role).await?;
    Ok(ApiData::json(user))
}
