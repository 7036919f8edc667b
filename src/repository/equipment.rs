//! Equipment types and assignments repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::equipment::{
        AssignmentStatus, CreateAssignment, CreateEquipmentType, EquipmentAssignment,
        EquipmentType, SizeStock, UpdateEquipmentType,
    },
};

/// Postgres "undefined_table". The optional per-size stock table may be
/// absent on older deployments.
const UNDEFINED_TABLE: &str = "42P01";

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all equipment types
    pub async fn list_types(&self) -> AppResult<Vec<EquipmentType>> {
        let rows = sqlx::query_as::<_, EquipmentType>(
            "SELECT * FROM equipment_types ORDER BY name, size",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get equipment type by ID
    pub async fn get_type_by_id(&self, id: i32) -> AppResult<EquipmentType> {
        sqlx::query_as::<_, EquipmentType>("SELECT * FROM equipment_types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment type with id {} not found", id)))
    }

    /// Create an equipment type
    pub async fn create_type(&self, data: &CreateEquipmentType) -> AppResult<EquipmentType> {
        let row = sqlx::query_as::<_, EquipmentType>(
            r#"
            INSERT INTO equipment_types (name, quantity, size, fee, photo_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.quantity)
        .bind(&data.size)
        .bind(data.fee)
        .bind(&data.photo_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update an equipment type; only the allow-listed fields are touched
    pub async fn update_type(&self, id: i32, data: &UpdateEquipmentType) -> AppResult<EquipmentType> {
        let mut sets = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.quantity, "quantity");
        add_field!(data.size, "size");
        add_field!(data.fee, "fee");
        add_field!(data.photo_url, "photo_url");

        if sets.is_empty() {
            return self.get_type_by_id(id).await;
        }

        let sql = format!(
            "UPDATE equipment_types SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut q = sqlx::query_as::<_, EquipmentType>(&sql);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    q = q.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.quantity);
        bind_field!(data.size);
        bind_field!(data.fee);
        bind_field!(data.photo_url);

        q.bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment type with id {} not found", id)))
    }

    /// Delete an equipment type
    pub async fn delete_type(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment type with id {} not found", id)));
        }
        Ok(())
    }

    /// Sum quantities of active assignments for one type, optionally one size
    pub async fn sum_assigned(&self, type_id: i32, size: Option<&str>) -> AppResult<i64> {
        let sum: Option<i64> = if let Some(size) = size {
            sqlx::query_scalar(
                r#"
                SELECT SUM(quantity)::bigint FROM equipment_assignments
                WHERE equipment_type_id = $1 AND status = 'assigned' AND LOWER(size) = LOWER($2)
                "#,
            )
            .bind(type_id)
            .bind(size)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar(
                r#"
                SELECT SUM(quantity)::bigint FROM equipment_assignments
                WHERE equipment_type_id = $1 AND status = 'assigned'
                "#,
            )
            .bind(type_id)
            .fetch_one(&self.pool)
            .await?
        };
        Ok(sum.unwrap_or(0))
    }

    /// All active assignment rows, for in-memory grouping by type
    pub async fn list_active_assignments(&self) -> AppResult<Vec<EquipmentAssignment>> {
        let rows = sqlx::query_as::<_, EquipmentAssignment>(
            "SELECT * FROM equipment_assignments WHERE status = 'assigned'",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Find the size variant of a group matching `size`, if any. The group
    /// parent itself is part of the group.
    pub async fn find_variant(&self, group_parent_id: i32, size: &str) -> AppResult<Option<EquipmentType>> {
        let row = sqlx::query_as::<_, EquipmentType>(
            r#"
            SELECT * FROM equipment_types
            WHERE (id = $1 OR size_id = $1) AND LOWER(size) = LOWER($2)
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(group_parent_id)
        .bind(size)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Increment the declared quantity of one variant row
    pub async fn increment_quantity(&self, id: i32, by: i32) -> AppResult<EquipmentType> {
        sqlx::query_as::<_, EquipmentType>(
            "UPDATE equipment_types SET quantity = quantity + $1 WHERE id = $2 RETURNING *",
        )
        .bind(by)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment type with id {} not found", id)))
    }

    /// Insert a new size variant cloning the parent's display attributes
    pub async fn insert_variant(
        &self,
        parent: &EquipmentType,
        size: &str,
        quantity: i32,
    ) -> AppResult<EquipmentType> {
        let row = sqlx::query_as::<_, EquipmentType>(
            r#"
            INSERT INTO equipment_types (name, quantity, size, size_id, fee, photo_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&parent.name)
        .bind(quantity)
        .bind(size)
        .bind(parent.group_parent_id())
        .bind(parent.fee)
        .bind(&parent.photo_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Per-size stock lines from the optional sub-table. A missing relation
    /// yields `None`; any other failure propagates.
    pub async fn size_breakdown(&self) -> AppResult<Option<Vec<SizeStock>>> {
        let result = sqlx::query_as::<_, SizeStock>(
            "SELECT equipment_type_id, size, quantity FROM equipment_stock_sizes",
        )
        .fetch_all(&self.pool)
        .await;

        match result {
            Ok(rows) => Ok(Some(rows)),
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(UNDEFINED_TABLE) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// List assignments, enriched with equipment and student names
    pub async fn list_assignments(&self, student_id: Option<i32>) -> AppResult<Vec<EquipmentAssignment>> {
        let sql = r#"
            SELECT a.*, e.name as equipment_name,
                   s.name || ' ' || s.surname as student_name
            FROM equipment_assignments a
            JOIN equipment_types e ON a.equipment_type_id = e.id
            JOIN students s ON a.student_id = s.id
            {}
            ORDER BY a.assigned_date DESC
        "#;

        let rows = if let Some(student_id) = student_id {
            sqlx::query_as::<_, EquipmentAssignment>(&sql.replace("{}", "WHERE a.student_id = $1"))
                .bind(student_id)
                .fetch_all(&self.pool)
                .await?
        } else {
            sqlx::query_as::<_, EquipmentAssignment>(&sql.replace("{}", ""))
                .fetch_all(&self.pool)
                .await?
        };
        Ok(rows)
    }

    /// Get assignment by ID
    pub async fn get_assignment_by_id(&self, id: i32) -> AppResult<EquipmentAssignment> {
        sqlx::query_as::<_, EquipmentAssignment>(
            "SELECT * FROM equipment_assignments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Assignment with id {} not found", id)))
    }

    /// Create an assignment
    pub async fn create_assignment(&self, data: &CreateAssignment) -> AppResult<EquipmentAssignment> {
        let row = sqlx::query_as::<_, EquipmentAssignment>(
            r#"
            INSERT INTO equipment_assignments
                (equipment_type_id, student_id, size, quantity, status, assigned_date)
            VALUES ($1, $2, $3, $4, 'assigned', $5)
            RETURNING *
            "#,
        )
        .bind(data.equipment_type_id)
        .bind(data.student_id)
        .bind(&data.size)
        .bind(data.quantity)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Mark an assignment returned with a timestamp
    pub async fn mark_returned(&self, id: i32) -> AppResult<EquipmentAssignment> {
        let assignment = self.get_assignment_by_id(id).await?;
        if assignment.status == AssignmentStatus::Returned {
            return Err(AppError::BusinessRule("Assignment already returned".to_string()));
        }

        sqlx::query_as::<_, EquipmentAssignment>(
            r#"
            UPDATE equipment_assignments
            SET status = 'returned', returned_date = $1
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Assignment with id {} not found", id)))
    }
}
