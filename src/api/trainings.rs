//! Training and attendance endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::training::{
        AttendanceRecord, CreateAttendance, CreateTraining, Training, TrainingQuery,
        UpdateTraining,
    },
};

use super::{ApiData, AuthenticatedUser};

/// List trainings
#[utoipa::path(
    get,
    path = "/trainings",
    tag = "trainings",
    security(("bearer_auth" = [])),
    params(TrainingQuery),
    responses(
        (status = 200, description = "Trainings", body = Vec<Training>)
    )
)]
pub async fn list_trainings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<TrainingQuery>,
) -> AppResult<Json<ApiData<Vec<Training>>>> {
    let trainings = state.services.trainings.list(&query).await?;
    Ok(ApiData::json(trainings))
}

/// Get one training
#[utoipa::path(
    get,
    path = "/trainings/{id}",
    tag = "trainings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Training ID")),
    responses(
        (status = 200, description = "Training", body = Training),
        (status = 404, description = "Training not found")
    )
)]
pub async fn get_training(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiData<Training>>> {
    let training = state.services.trainings.get_by_id(id).await?;
    Ok(ApiData::json(training))
}

/// Create a training
#[utoipa::path(
    post,
    path = "/trainings",
    tag = "trainings",
    security(("bearer_auth" = [])),
    request_body = CreateTraining,
    responses(
        (status = 201, description = "Training created", body = Training)
    )
)]
pub async fn create_training(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateTraining>,
) -> AppResult<(StatusCode, Json<ApiData<Training>>)> {
    claims.require_manager()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let training = state.services.trainings.create(request).await?;
    Ok((StatusCode::CREATED, ApiData::json(training)))
}

/// Update a training
#[utoipa::path(
    put,
    path = "/trainings/{id}",
    tag = "trainings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Training ID")),
    request_body = UpdateTraining,
    responses(
        (status = 200, description = "Training updated", body = Training),
        (status = 404, description = "Training not found")
    )
)]
pub async fn update_training(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateTraining>,
) -> AppResult<Json<ApiData<Training>>> {
    claims.require_manager()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let training = state.services.trainings.update(id, request).await?;
    Ok(ApiData::json(training))
}

/// Delete a training
#[utoipa::path(
    delete,
    path = "/trainings/{id}",
    tag = "trainings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Training ID")),
    responses(
        (status = 200, description = "Training deleted"),
        (status = 404, description = "Training not found")
    )
)]
pub async fn delete_training(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiData<()>>> {
    claims.require_manager()?;
    state.services.trainings.delete(id).await?;
    Ok(ApiData::json(()))
}

/// Attendance sheet for one training
#[utoipa::path(
    get,
    path = "/trainings/{id}/attendance",
    tag = "trainings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Training ID")),
    responses(
        (status = 200, description = "Attendance records", body = Vec<AttendanceRecord>),
        (status = 404, description = "Training not found")
    )
)]
pub async fn list_attendance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiData<Vec<AttendanceRecord>>>> {
    let records = state.services.trainings.list_attendance(id).await?;
    Ok(ApiData::json(records))
}

/// Record one student's attendance; repeated records for the same pair
/// overwrite
#[utoipa::path(
    post,
    path = "/trainings/{id}/attendance",
    tag = "trainings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Training ID")),
    request_body = CreateAttendance,
    responses(
        (status = 200, description = "Attendance recorded", body = AttendanceRecord),
        (status = 404, description = "Training or student not found")
    )
)]
pub async fn record_attendance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<CreateAttendance>,
) -> AppResult<Json<ApiData<AttendanceRecord>>> {
    let record = state.services.trainings.record_attendance(id, request).await?;
    Ok(ApiData::json(record))
}

/// Delete one attendance record
#[utoipa::path(
    delete,
    path = "/attendance/{id}",
    tag = "trainings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Attendance record ID")),
    responses(
        (status = 200, description = "Attendance record deleted"),
        (status = 404, description = "Attendance record not found")
    )
)]
pub async fn delete_attendance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiData<()>>> {
    claims.require_manager()?;
    state.services.trainings.delete_attendance(id).await?;
    Ok(ApiData::json(()))
}
