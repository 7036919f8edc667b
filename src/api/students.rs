//! Student management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::student::{CreateStudent, Student, StudentQuery, UpdateStudent},
};

use super::{ApiData, AuthenticatedUser};

/// List students
#[utoipa::path(
    get,
    path = "/students",
    tag = "students",
    security(("bearer_auth" = [])),
    params(StudentQuery),
    responses(
        (status = 200, description = "Students", body = Vec<Student>)
    )
)]
pub async fn list_students(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<StudentQuery>,
) -> AppResult<Json<ApiData<Vec<Student>>>> {
    let students = state.services.students.list(&query).await?;
    Ok(ApiData::json(students))
}

/// Get one student
#[utoipa::path(
    get,
    path = "/students/{id}",
    tag = "students",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student", body = Student),
        (status = 404, description = "Student not found")
    )
)]
pub async fn get_student(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiData<Student>>> {
    let student = state.services.students.get_by_id(id).await?;
    Ok(ApiData::json(student))
}

/// Create a student
#[utoipa::path(
    post,
    path = "/students",
    tag = "students",
    security(("bearer_auth" = [])),
    request_body = CreateStudent,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_student(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateStudent>,
) -> AppResult<(StatusCode, Json<ApiData<Student>>)> {
    claims.require_manager()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let student = state.services.students.create(request).await?;
    Ok((StatusCode::CREATED, ApiData::json(student)))
}

/// Update a student. Discount or branch changes trigger payment
/// recalculation.
#[utoipa::path(
    put,
    path = "/students/{id}",
    tag = "students",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Student ID")),
    request_body = UpdateStudent,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 404, description = "Student not found")
    )
)]
pub async fn update_student(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateStudent>,
) -> AppResult<Json<ApiData<Student>>> {
    claims.require_manager()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let student = state.services.students.update(id, request).await?;
    Ok(ApiData::json(student))
}

/// Soft-delete a student
#[utoipa::path(
    delete,
    path = "/students/{id}",
    tag = "students",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student deleted"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn delete_student(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiData<()>>> {
    claims.require_manager()?;
    state.services.students.delete(id).await?;
    Ok(ApiData::json(()))
}

/// Enrollment response: the created student and their first payment
#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct EnrollmentResponse {
    pub student: Student,
    pub payment: crate::models::payment::Payment,
}

/// Enroll a student: creates the row plus the unpaid payment for the current
/// calendar period.
#[utoipa::path(
    post,
    path = "/enrollments",
    tag = "students",
    security(("bearer_auth" = [])),
    request_body = CreateStudent,
    responses(
        (status = 201, description = "Student enrolled", body = EnrollmentResponse),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn enroll_student(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateStudent>,
) -> AppResult<(StatusCode, Json<ApiData<EnrollmentResponse>>)> {
    claims.require_manager()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (student, payment) = state.services.students.enroll(request).await?;
    Ok((
        StatusCode::CREATED,
        ApiData::json(EnrollmentResponse { student, payment }),
    ))
}

/// Recalculation response
#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct RecalculationResponse {
    /// Number of payment rows updated
    pub updated: u64,
}

/// Recompute unpaid future payments for one student
#[utoipa::path(
    post,
    path = "/students/{id}/recalculate-payments",
    tag = "students",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Payments recalculated", body = RecalculationResponse),
        (status = 404, description = "Student not found")
    )
)]
pub async fn recalculate_payments(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiData<RecalculationResponse>>> {
    claims.require_manager()?;
    let updated = state.services.payments.recalculate_for_student(id).await?;
    Ok(ApiData::json(RecalculationResponse { updated }))
}
