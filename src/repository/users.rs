//! User profiles repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUserProfile, Role, UpdateUserProfile, UserProfile},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all user profiles
    pub async fn list(&self) -> AppResult<Vec<UserProfile>> {
        let rows = sqlx::query_as::<_, UserProfile>(
            "SELECT * FROM user_profiles ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get user profile by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<UserProfile> {
        sqlx::query_as::<_, UserProfile>("SELECT * FROM user_profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Find the credential row by email or username, case-insensitively
    pub async fn get_by_login(&self, login: &str) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT * FROM user_profiles
            WHERE LOWER(username) = LOWER($1) OR LOWER(email) = LOWER($1)
            "#,
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Check if username already exists
    pub async fn username_exists(&self, username: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM user_profiles WHERE LOWER(username) = LOWER($1) AND id != $2)",
            )
            .bind(username)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM user_profiles WHERE LOWER(username) = LOWER($1))",
            )
            .bind(username)
            .fetch_one(&self.pool)
            .await?
        };
        Ok(exists)
    }

    /// Create a user profile; the password hash is computed by the caller
    pub async fn create(&self, data: &CreateUserProfile, password_hash: String) -> AppResult<UserProfile> {
        let row = sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO user_profiles (username, email, password, role, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.username)
        .bind(&data.email)
        .bind(password_hash)
        .bind(data.role)
        .bind(data.is_active.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a user profile; only the allow-listed fields are touched
    pub async fn update(
        &self,
        id: i32,
        data: &UpdateUserProfile,
        password_hash: Option<String>,
    ) -> AppResult<UserProfile> {
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

        add_field!(data.username, "username");
        add_field!(data.email, "email");
        add_field!(password_hash, "password");
        add_field!(data.role, "role");
        add_field!(data.is_active, "is_active");

        let sql = format!(
            "UPDATE user_profiles SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut q = sqlx::query_as::<_, UserProfile>(&sql).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    q = q.bind(val);
                }
            };
        }

        bind_field!(data.username);
        bind_field!(data.email);
        bind_field!(password_hash);
        bind_field!(data.role);
        bind_field!(data.is_active);

        q.bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Delete a user profile
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM user_profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }
        Ok(())
    }

    /// Narrow role-only update used by admin tooling
    pub async fn update_role(&self, id: i32, role: Role) -> AppResult<UserProfile> {
        sqlx::query_as::<_, UserProfile>(
            "UPDATE user_profiles SET role = $1, updated_at = $2 WHERE id = $3 RETURNING *",
        )
        .bind(role)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }
}
