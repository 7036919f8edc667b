//! Payment endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::payment::{CreatePayment, Payment, PaymentQuery, UpdatePayment},
};

use super::{ApiData, AuthenticatedUser};

/// List payments
#[utoipa::path(
    get,
    path = "/payments",
    tag = "payments",
    security(("bearer_auth" = [])),
    params(PaymentQuery),
    responses(
        (status = 200, description = "Payments", body = Vec<Payment>)
    )
)]
pub async fn list_payments(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<PaymentQuery>,
) -> AppResult<Json<ApiData<Vec<Payment>>>> {
    let payments = state.services.payments.list(&query).await?;
    Ok(ApiData::json(payments))
}

/// Get one payment
#[utoipa::path(
    get,
    path = "/payments/{id}",
    tag = "payments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment", body = Payment),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn get_payment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiData<Payment>>> {
    let payment = state.services.payments.get_by_id(id).await?;
    Ok(ApiData::json(payment))
}

/// Create a payment
#[utoipa::path(
    post,
    path = "/payments",
    tag = "payments",
    security(("bearer_auth" = [])),
    request_body = CreatePayment,
    responses(
        (status = 201, description = "Payment created", body = Payment),
        (status = 404, description = "Student not found")
    )
)]
pub async fn create_payment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreatePayment>,
) -> AppResult<(StatusCode, Json<ApiData<Payment>>)> {
    claims.require_manager()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let payment = state.services.payments.create(request).await?;
    Ok((StatusCode::CREATED, ApiData::json(payment)))
}

/// Update a payment
#[utoipa::path(
    put,
    path = "/payments/{id}",
    tag = "payments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Payment ID")),
    request_body = UpdatePayment,
    responses(
        (status = 200, description = "Payment updated", body = Payment),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn update_payment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdatePayment>,
) -> AppResult<Json<ApiData<Payment>>> {
    claims.require_manager()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let payment = state.services.payments.update(id, request).await?;
    Ok(ApiData::json(payment))
}

/// Delete a payment
#[utoipa::path(
    delete,
    path = "/payments/{id}",
    tag = "payments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment deleted"),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn delete_payment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiData<()>>> {
    claims.require_manager()?;
    state.services.payments.delete(id).await?;
    Ok(ApiData::json(()))
}
