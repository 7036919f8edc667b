//! Students repository for database operations

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::student::{CreateStudent, Student, StudentQuery, UpdateStudent},
};

#[derive(Clone)]
pub struct StudentsRepository {
    pool: Pool<Postgres>,
}

impl StudentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List students, enriched with branch name
    pub async fn list(&self, query: &StudentQuery) -> AppResult<Vec<Student>> {
        let mut conditions = Vec::new();
        if !query.include_deleted.unwrap_or(false) {
            conditions.push("s.is_deleted = FALSE".to_string());
        }
        let mut bind_idx = 1;
        if query.sport_branch_id.is_some() {
            conditions.push(format!("s.sport_branch_id = ${}", bind_idx));
            bind_idx += 1;
        }
        if query.search.is_some() {
            conditions.push(format!(
                "(s.name ILIKE ${i} OR s.surname ILIKE ${i})",
                i = bind_idx
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            r#"
            SELECT s.*, b.name as sport_branch
            FROM students s
            LEFT JOIN sport_branches b ON s.sport_branch_id = b.id
            {}
            ORDER BY s.surname, s.name
            "#,
            where_clause
        );

        let mut q = sqlx::query_as::<_, Student>(&sql);
        if let Some(branch_id) = query.sport_branch_id {
            q = q.bind(branch_id);
        }
        if let Some(ref search) = query.search {
            q = q.bind(format!("%{}%", search));
        }

        Ok(q.fetch_all(&self.pool).await?)
    }

    /// Get student by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Student> {
        sqlx::query_as::<_, Student>(
            r#"
            SELECT s.*, b.name as sport_branch
            FROM students s
            LEFT JOIN sport_branches b ON s.sport_branch_id = b.id
            WHERE s.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student with id {} not found", id)))
    }

    /// Create a student; branch id and discount are resolved by the caller
    pub async fn create(
        &self,
        data: &CreateStudent,
        sport_branch_id: Option<i32>,
        discount_rate: Decimal,
    ) -> AppResult<Student> {
        let row = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (name, surname, sport_branch_id, discount_rate,
                                  birth_date, phone, photo_thumb_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *, NULL as sport_branch
            "#,
        )
        .bind(&data.name)
        .bind(&data.surname)
        .bind(sport_branch_id)
        .bind(discount_rate)
        .bind(data.birth_date)
        .bind(&data.phone)
        .bind(&data.photo_thumb_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a student; only the allow-listed fields are touched
    pub async fn update(
        &self,
        id: i32,
        data: &UpdateStudent,
        sport_branch_id: Option<i32>,
    ) -> AppResult<Student> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.surname, "surname");
        add_field!(sport_branch_id, "sport_branch_id");
        add_field!(data.discount_rate, "discount_rate");
        add_field!(data.payment_status, "payment_status");
        add_field!(data.birth_date, "birth_date");
        add_field!(data.phone, "phone");
        add_field!(data.photo_thumb_url, "photo_thumb_url");

        let sql = format!(
            "UPDATE students SET {} WHERE id = ${} RETURNING *, NULL as sport_branch",
            sets.join(", "),
            idx
        );

        let mut q = sqlx::query_as::<_, Student>(&sql).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    q = q.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.surname);
        bind_field!(sport_branch_id);
        bind_field!(data.discount_rate);
        bind_field!(data.payment_status);
        bind_field!(data.birth_date);
        bind_field!(data.phone);
        bind_field!(data.photo_thumb_url);

        q.bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student with id {} not found", id)))
    }

    /// Soft-delete a student
    pub async fn soft_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE students SET is_deleted = TRUE, updated_at = $1 WHERE id = $2",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Student with id {} not found", id)));
        }
        Ok(())
    }
}
