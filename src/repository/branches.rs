//! Sport branches repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::branch::{CreateBranch, SportBranch, UpdateBranch},
};

#[derive(Clone)]
pub struct BranchesRepository {
    pool: Pool<Postgres>,
}

impl BranchesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all branches
    pub async fn list(&self) -> AppResult<Vec<SportBranch>> {
        let rows = sqlx::query_as::<_, SportBranch>(
            "SELECT * FROM sport_branches ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get branch by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<SportBranch> {
        sqlx::query_as::<_, SportBranch>("SELECT * FROM sport_branches WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Sport branch with id {} not found", id)))
    }

    /// Get branch by name, case-insensitively
    pub async fn get_by_name(&self, name: &str) -> AppResult<Option<SportBranch>> {
        let row = sqlx::query_as::<_, SportBranch>(
            "SELECT * FROM sport_branches WHERE LOWER(name) = LOWER($1)",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Create a branch
    pub async fn create(&self, data: &CreateBranch) -> AppResult<SportBranch> {
        let row = sqlx::query_as::<_, SportBranch>(
            r#"
            INSERT INTO sport_branches (name, monthly_fee, description)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.monthly_fee)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a branch; only the allow-listed fields are touched
    pub async fn update(&self, id: i32, data: &UpdateBranch) -> AppResult<SportBranch> {
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
        add_field!(data.monthly_fee, "monthly_fee");
        add_field!(data.description, "description");

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let sql = format!(
            "UPDATE sport_branches SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut q = sqlx::query_as::<_, SportBranch>(&sql);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    q = q.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.monthly_fee);
        bind_field!(data.description);

        q.bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Sport branch with id {} not found", id)))
    }

    /// Delete a branch
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM sport_branches WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Sport branch with id {} not found", id)));
        }
        Ok(())
    }
}
