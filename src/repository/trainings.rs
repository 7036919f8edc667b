//! Trainings and attendance repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::training::{
        AttendanceRecord, CreateAttendance, CreateTraining, Training, TrainingQuery,
        UpdateTraining,
    },
};

#[derive(Clone)]
pub struct TrainingsRepository {
    pool: Pool<Postgres>,
}

impl TrainingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List trainings, enriched with branch name
    pub async fn list(&self, query: &TrainingQuery) -> AppResult<Vec<Training>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.sport_branch_id.is_some() {
            conditions.push(format!("t.sport_branch_id = ${}", idx));
            idx += 1;
        }
        if query.from.is_some() {
            conditions.push(format!("t.starts_at >= ${}", idx));
            idx += 1;
        }
        if query.to.is_some() {
            conditions.push(format!("t.starts_at <= ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            r#"
            SELECT t.*, b.name as sport_branch
            FROM trainings t
            LEFT JOIN sport_branches b ON t.sport_branch_id = b.id
            {}
            ORDER BY t.starts_at DESC
            "#,
            where_clause
        );

        let mut q = sqlx::query_as::<_, Training>(&sql);
        if let Some(v) = query.sport_branch_id {
            q = q.bind(v);
        }
        if let Some(v) = query.from {
            q = q.bind(v);
        }
        if let Some(v) = query.to {
            q = q.bind(v);
        }

        Ok(q.fetch_all(&self.pool).await?)
    }

    /// Get training by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Training> {
        sqlx::query_as::<_, Training>(
            r#"
            SELECT t.*, b.name as sport_branch
            FROM trainings t
            LEFT JOIN sport_branches b ON t.sport_branch_id = b.id
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Training with id {} not found", id)))
    }

    /// Create a training
    pub async fn create(&self, data: &CreateTraining) -> AppResult<Training> {
        let row = sqlx::query_as::<_, Training>(
            r#"
            INSERT INTO trainings (sport_branch_id, title, starts_at, ends_at, location, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *, NULL as sport_branch
            "#,
        )
        .bind(data.sport_branch_id)
        .bind(&data.title)
        .bind(data.starts_at)
        .bind(data.ends_at)
        .bind(&data.location)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a training; only the allow-listed fields are touched
    pub async fn update(&self, id: i32, data: &UpdateTraining) -> AppResult<Training> {
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

        add_field!(data.sport_branch_id, "sport_branch_id");
        add_field!(data.title, "title");
        add_field!(data.starts_at, "starts_at");
        add_field!(data.ends_at, "ends_at");
        add_field!(data.location, "location");
        add_field!(data.notes, "notes");

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let sql = format!(
            "UPDATE trainings SET {} WHERE id = ${} RETURNING *, NULL as sport_branch",
            sets.join(", "),
            idx
        );

        let mut q = sqlx::query_as::<_, Training>(&sql);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    q = q.bind(val);
                }
            };
        }

        bind_field!(data.sport_branch_id);
        bind_field!(data.title);
        bind_field!(data.starts_at);
        bind_field!(data.ends_at);
        bind_field!(data.location);
        bind_field!(data.notes);

        q.bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Training with id {} not found", id)))
    }

    /// Delete a training and its attendance records
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM trainings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Training with id {} not found", id)));
        }
        Ok(())
    }

    /// Attendance for one training, enriched with student names
    pub async fn list_attendance(&self, training_id: i32) -> AppResult<Vec<AttendanceRecord>> {
        let rows = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            SELECT a.*, s.name || ' ' || s.surname as student_name
            FROM attendance_records a
            JOIN students s ON a.student_id = s.id
            WHERE a.training_id = $1
            ORDER BY s.surname, s.name
            "#,
        )
        .bind(training_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Record attendance for one (training, student). An existing record for
    /// the pair is overwritten, so re-taking attendance is safe.
    pub async fn upsert_attendance(
        &self,
        training_id: i32,
        data: &CreateAttendance,
    ) -> AppResult<AttendanceRecord> {
        let row = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            INSERT INTO attendance_records (training_id, student_id, present, notes, recorded_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (training_id, student_id)
            DO UPDATE SET present = EXCLUDED.present, notes = EXCLUDED.notes,
                          recorded_at = EXCLUDED.recorded_at
            RETURNING *
            "#,
        )
        .bind(training_id)
        .bind(data.student_id)
        .bind(data.present)
        .bind(&data.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Delete one attendance record
    pub async fn delete_attendance(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM attendance_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Attendance record with id {} not found", id)));
        }
        Ok(())
    }
}
