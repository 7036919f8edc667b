//! Sport branch model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Sport branch record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SportBranch {
    pub id: i32,
    pub name: String,
    /// Default monthly fee for students of this branch
    pub monthly_fee: Decimal,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Create branch request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBranch {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub monthly_fee: Decimal,
    pub description: Option<String>,
}

/// Update branch request (explicit allow-list of mutable fields)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBranch {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    pub monthly_fee: Option<Decimal>,
    pub description: Option<String>,
}
