//! Training session and attendance models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Training session record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Training {
    pub id: i32,
    pub sport_branch_id: Option<i32>,
    #[sqlx(default)]
    pub sport_branch: Option<String>,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Create training request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTraining {
    pub sport_branch_id: Option<i32>,
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// Update training request (explicit allow-list of mutable fields)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTraining {
    pub sport_branch_id: Option<i32>,
    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// Training list filter
#[derive(Debug, Deserialize, IntoParams)]
pub struct TrainingQuery {
    pub sport_branch_id: Option<i32>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Attendance record for one (training, student) pair
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AttendanceRecord {
    pub id: i32,
    pub training_id: i32,
    pub student_id: i32,
    pub present: bool,
    pub notes: Option<String>,
    pub recorded_at: Option<DateTime<Utc>>,
    #[sqlx(default)]
    pub student_name: Option<String>,
}

/// Record attendance request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAttendance {
    pub student_id: i32,
    pub present: bool,
    pub notes: Option<String>,
}
