//! Activity log endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::activity::{ActivityLog, ActivityQuery},
};

use super::{ApiData, AuthenticatedUser};

/// List audit trail entries, newest first
#[utoipa::path(
    get,
    path = "/activity",
    tag = "activity",
    security(("bearer_auth" = [])),
    params(ActivityQuery),
    responses(
        (status = 200, description = "Activity log entries", body = Vec<ActivityLog>)
    )
)]
pub async fn list_activity(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<ActivityQuery>,
) -> AppResult<Json<ApiData<Vec<ActivityLog>>>> {
    claims.require_manager()?;
    let entries = state.services.activity.list(&query).await?;
    Ok(ApiData::json(entries))
}
