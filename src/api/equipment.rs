//! Equipment type and assignment endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{
        AddStock, CreateAssignment, CreateEquipmentType, EquipmentAssignment, EquipmentType,
        EquipmentTypeWithStock, UpdateEquipmentType,
    },
};

use super::{ApiData, AuthenticatedUser};

/// Equipment list with derived availability
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Equipment types with availability", body = Vec<EquipmentTypeWithStock>)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<ApiData<Vec<EquipmentTypeWithStock>>>> {
    let equipment = state.services.equipment.list_with_stock().await?;
    Ok(ApiData::json(equipment))
}

/// Get one equipment type
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment type ID")),
    responses(
        (status = 200, description = "Equipment type", body = EquipmentType),
        (status = 404, description = "Equipment type not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiData<EquipmentType>>> {
    let equipment = state.services.equipment.get_type(id).await?;
    Ok(ApiData::json(equipment))
}

/// Availability query
#[derive(Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    /// Restrict to one size variant
    pub size: Option<String>,
}

/// Availability response
#[derive(Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub available_quantity: i32,
}

/// Derived availability of one type
#[utoipa::path(
    get,
    path = "/equipment/{id}/availability",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Equipment type ID"),
        AvailabilityQuery
    ),
    responses(
        (status = 200, description = "Available quantity", body = AvailabilityResponse),
        (status = 404, description = "Equipment type not found")
    )
)]
pub async fn get_availability(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<ApiData<AvailabilityResponse>>> {
    let available_quantity = state
        .services
        .equipment
        .availability(id, query.size.as_deref())
        .await?;
    Ok(ApiData::json(AvailabilityResponse { available_quantity }))
}

/// Create an equipment type
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    request_body = CreateEquipmentType,
    responses(
        (status = 201, description = "Equipment type created", body = EquipmentType)
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateEquipmentType>,
) -> AppResult<(StatusCode, Json<ApiData<EquipmentType>>)> {
    claims.require_manager()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let equipment = state.services.equipment.create_type(request).await?;
    Ok((StatusCode::CREATED, ApiData::json(equipment)))
}

/// Update an equipment type
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment type ID")),
    request_body = UpdateEquipmentType,
    responses(
        (status = 200, description = "Equipment type updated", body = EquipmentType),
        (status = 404, description = "Equipment type not found")
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateEquipmentType>,
) -> AppResult<Json<ApiData<EquipmentType>>> {
    claims.require_manager()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let equipment = state.services.equipment.update_type(id, request).await?;
    Ok(ApiData::json(equipment))
}

/// Delete an equipment type
#[utoipa::path(
    delete,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment type ID")),
    responses(
        (status = 200, description = "Equipment type deleted"),
        (status = 404, description = "Equipment type not found")
    )
)]
pub async fn delete_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiData<()>>> {
    claims.require_manager()?;
    state.services.equipment.delete_type(id).await?;
    Ok(ApiData::json(()))
}

/// Add stock to one size variant of a group
#[utoipa::path(
    post,
    path = "/equipment/{id}/stock",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment type ID (any row of the group)")),
    request_body = AddStock,
    responses(
        (status = 200, description = "Stock added", body = EquipmentType),
        (status = 400, description = "Invalid quantity or size"),
        (status = 404, description = "Equipment type not found")
    )
)]
pub async fn add_stock(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<AddStock>,
) -> AppResult<Json<ApiData<EquipmentType>>> {
    claims.require_manager()?;
    let equipment = state.services.equipment.add_stock(id, request).await?;
    Ok(ApiData::json(equipment))
}

/// Assignment list filter
#[derive(Deserialize, IntoParams)]
pub struct AssignmentQuery {
    pub student_id: Option<i32>,
}

/// List assignments
#[utoipa::path(
    get,
    path = "/assignments",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(AssignmentQuery),
    responses(
        (status = 200, description = "Assignments", body = Vec<EquipmentAssignment>)
    )
)]
pub async fn list_assignments(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<AssignmentQuery>,
) -> AppResult<Json<ApiData<Vec<EquipmentAssignment>>>> {
    let assignments = state.services.equipment.list_assignments(query.student_id).await?;
    Ok(ApiData::json(assignments))
}

/// Assign equipment to a student
#[utoipa::path(
    post,
    path = "/assignments",
    tag = "equipment",
    security(("bearer_auth" = [])),
    request_body = CreateAssignment,
    responses(
        (status = 201, description = "Equipment assigned", body = EquipmentAssignment),
        (status = 404, description = "Student or equipment not found"),
        (status = 422, description = "Insufficient stock")
    )
)]
pub async fn create_assignment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateAssignment>,
) -> AppResult<(StatusCode, Json<ApiData<EquipmentAssignment>>)> {
    claims.require_manager()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let assignment = state.services.equipment.assign(request).await?;
    Ok((StatusCode::CREATED, ApiData::json(assignment)))
}

/// Return response: the closed assignment and the cancelled fee payment, if
/// one was located
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    pub assignment: EquipmentAssignment,
    pub cancelled_payment_id: Option<i32>,
}

/// Return assigned equipment. Cancels the matching unpaid fee payment when
/// one can be located.
#[utoipa::path(
    post,
    path = "/assignments/{id}/return",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Equipment returned", body = ReturnResponse),
        (status = 404, description = "Assignment not found"),
        (status = 422, description = "Already returned")
    )
)]
pub async fn return_assignment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiData<ReturnResponse>>> {
    claims.require_manager()?;
    let (assignment, cancelled_payment_id) = state.services.equipment.return_assignment(id).await?;
    Ok(ApiData::json(ReturnResponse {
        assignment,
        cancelled_payment_id,
    }))
}
