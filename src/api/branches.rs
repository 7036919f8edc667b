//! Sport branch endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::branch::{CreateBranch, SportBranch, UpdateBranch},
};

use super::{ApiData, AuthenticatedUser};

/// List branches
#[utoipa::path(
    get,
    path = "/branches",
    tag = "branches",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Branches", body = Vec<SportBranch>)
    )
)]
pub async fn list_branches(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<ApiData<Vec<SportBranch>>>> {
    let branches = state.services.branches.list().await?;
    Ok(ApiData::json(branches))
}

/// Get one branch
#[utoipa::path(
    get,
    path = "/branches/{id}",
    tag = "branches",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Branch ID")),
    responses(
        (status = 200, description = "Branch", body = SportBranch),
        (status = 404, description = "Branch not found")
    )
)]
pub async fn get_branch(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiData<SportBranch>>> {
    let branch = state.services.branches.get_by_id(id).await?;
    Ok(ApiData::json(branch))
}

/// Create a branch
#[utoipa::path(
    post,
    path = "/branches",
    tag = "branches",
    security(("bearer_auth" = [])),
    request_body = CreateBranch,
    responses(
        (status = 201, description = "Branch created", body = SportBranch)
    )
)]
pub async fn create_branch(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateBranch>,
) -> AppResult<(StatusCode, Json<ApiData<SportBranch>>)> {
    claims.require_manager()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let branch = state.services.branches.create(request).await?;
    Ok((StatusCode::CREATED, ApiData::json(branch)))
}

/// Update a branch
#[utoipa::path(
    put,
    path = "/branches/{id}",
    tag = "branches",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Branch ID")),
    request_body = UpdateBranch,
    responses(
        (status = 200, description = "Branch updated", body = SportBranch),
        (status = 404, description = "Branch not found")
    )
)]
pub async fn update_branch(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateBranch>,
) -> AppResult<Json<ApiData<SportBranch>>> {
    claims.require_manager()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let branch = state.services.branches.update(id, request).await?;
    Ok(ApiData::json(branch))
}

/// Delete a branch
#[utoipa::path(
    delete,
    path = "/branches/{id}",
    tag = "branches",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Branch ID")),
    responses(
        (status = 200, description = "Branch deleted"),
        (status = 404, description = "Branch not found")
    )
)]
pub async fn delete_branch(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiData<()>>> {
    claims.require_manager()?;
    state.services.branches.delete(id).await?;
    Ok(ApiData::json(()))
}
