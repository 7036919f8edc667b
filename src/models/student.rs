//! Student model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Student record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub sport_branch_id: Option<i32>,
    /// Branch name denormalized for display (joined on list/get)
    #[sqlx(default)]
    pub sport_branch: Option<String>,
    /// Percentage, 0..=100
    pub discount_rate: Decimal,
    pub payment_status: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub photo_thumb_url: Option<String>,
    pub is_deleted: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create student request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStudent {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(min = 1, max = 128))]
    pub surname: String,
    pub sport_branch_id: Option<i32>,
    /// Branch by name, resolved case-insensitively when id is absent
    pub sport_branch: Option<String>,
    /// Percentage, 0..=100; range-checked in the service layer
    pub discount_rate: Option<Decimal>,
    pub birth_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub photo_thumb_url: Option<String>,
}

/// Update student request (explicit allow-list of mutable fields)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStudent {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub surname: Option<String>,
    pub sport_branch_id: Option<i32>,
    pub sport_branch: Option<String>,
    /// Percentage, 0..=100; range-checked in the service layer
    pub discount_rate: Option<Decimal>,
    pub payment_status: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub photo_thumb_url: Option<String>,
}

/// Student list filter
#[derive(Debug, Deserialize, IntoParams)]
pub struct StudentQuery {
    /// Include soft-deleted rows
    pub include_deleted: Option<bool>,
    /// Restrict to one branch
    pub sport_branch_id: Option<i32>,
    pub search: Option<String>,
}
