//! Equipment type and assignment models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Equipment type row. A size variant is a full row sharing `size_id` with
/// its siblings; the row whose own `id` equals `size_id` is the group parent.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentType {
    pub id: i32,
    pub name: String,
    /// Declared total stock for this variant
    pub quantity: i32,
    pub size: Option<String>,
    /// Variant group parent id; null for ungrouped rows
    pub size_id: Option<i32>,
    pub fee: Option<Decimal>,
    pub photo_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl EquipmentType {
    /// Resolve the variant group parent id: a row with no `size_id` is its
    /// own parent.
    pub fn group_parent_id(&self) -> i32 {
        self.size_id.unwrap_or(self.id)
    }
}

/// Equipment type enriched with derived availability
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EquipmentTypeWithStock {
    #[serde(flatten)]
    pub equipment: EquipmentType,
    /// `max(0, quantity - sum of assigned rows)`
    pub available_quantity: i32,
    /// Per-size breakdown when the per-size stock table exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_breakdown: Option<Vec<SizeStock>>,
}

/// One per-size stock line from the optional sub-table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SizeStock {
    pub equipment_type_id: i32,
    pub size: String,
    pub quantity: i32,
}

/// Create equipment type request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipmentType {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(range(min = 0))]
    pub quantity: i32,
    pub size: Option<String>,
    pub fee: Option<Decimal>,
    pub photo_url: Option<String>,
}

/// Update equipment type request (explicit allow-list of mutable fields)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipmentType {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    pub size: Option<String>,
    pub fee: Option<Decimal>,
    pub photo_url: Option<String>,
}

/// Add stock to one size variant of a group
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddStock {
    pub size: String,
    pub quantity: i32,
}

/// Assignment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum AssignmentStatus {
    Assigned,
    Returned,
}

/// Equipment assignment row. Only `assigned` rows count against stock.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentAssignment {
    pub id: i32,
    pub equipment_type_id: i32,
    pub student_id: i32,
    pub size: Option<String>,
    pub quantity: i32,
    pub status: AssignmentStatus,
    pub assigned_date: DateTime<Utc>,
    pub returned_date: Option<DateTime<Utc>>,
    /// Display enrichment, joined on list
    #[sqlx(default)]
    pub equipment_name: Option<String>,
    #[sqlx(default)]
    pub student_name: Option<String>,
}

/// Create assignment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAssignment {
    pub equipment_type_id: i32,
    pub student_id: i32,
    pub size: Option<String>,
    #[validate(range(min = 1))]
    pub quantity: i32,
    /// Charge the equipment fee as an unpaid payment row
    pub charge_fee: Option<bool>,
}
