//! Activity logs repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::activity::{ActivityLog, ActivityQuery, NewActivity},
};

const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 1000;

#[derive(Clone)]
pub struct ActivityLogsRepository {
    pool: Pool<Postgres>,
}

impl ActivityLogsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List log entries, newest first, capped
    pub async fn list(&self, query: &ActivityQuery) -> AppResult<Vec<ActivityLog>> {
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

        let mut conditions = Vec::new();
        let mut idx = 1;
        if query.entity_type.is_some() {
            conditions.push(format!("entity_type = ${}", idx));
            idx += 1;
        }
        if query.action.is_some() {
            conditions.push(format!("action = ${}", idx));
            idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT * FROM activity_logs {} ORDER BY created_at DESC LIMIT ${}",
            where_clause, idx
        );

        let mut q = sqlx::query_as::<_, ActivityLog>(&sql);
        if let Some(ref v) = query.entity_type {
            q = q.bind(v);
        }
        if let Some(ref v) = query.action {
            q = q.bind(v);
        }

        Ok(q.bind(limit).fetch_all(&self.pool).await?)
    }

    /// Append one entry
    pub async fn append(&self, entry: &NewActivity) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO activity_logs
                (action, entity_type, entity_id, description, user_type, user_role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&entry.action)
        .bind(&entry.entity_type)
        .bind(&entry.entity_id)
        .bind(&entry.description)
        .bind(&entry.user_type)
        .bind(&entry.user_role)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
