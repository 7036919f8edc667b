//! File storage endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Multipart;

use crate::{
    error::{AppError, AppResult},
    services::storage::StoredFile,
};

use super::{ApiData, AuthenticatedUser};

/// Upload one file (multipart field `file`) and receive its public URL
#[utoipa::path(
    post,
    path = "/files",
    tag = "files",
    security(("bearer_auth" = [])),
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "File stored", body = StoredFile),
        (status = 400, description = "No file field in request")
    )
)]
pub async fn upload_file(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiData<StoredFile>>)> {
    claims.require_manager()?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let original_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;

        let stored = state.services.storage.save(&original_name, &bytes).await?;
        return Ok((StatusCode::CREATED, ApiData::json(stored)));
    }

    Err(AppError::BadRequest("Missing multipart field 'file'".to_string()))
}

/// Remove one stored file by name
#[utoipa::path(
    delete,
    path = "/files/{name}",
    tag = "files",
    security(("bearer_auth" = [])),
    params(("name" = String, Path, description = "Stored file name")),
    responses(
        (status = 200, description = "File removed"),
        (status = 404, description = "File not found")
    )
)]
pub async fn delete_file(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(name): Path<String>,
) -> AppResult<Json<ApiData<()>>> {
    claims.require_manager()?;
    state.services.storage.remove(&name).await?;
    Ok(ApiData::json(()))
}
