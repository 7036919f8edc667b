//! Payments repository for database operations

use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::payment::{CreatePayment, Payment, PaymentQuery, UpdatePayment},
};

#[derive(Clone)]
pub struct PaymentsRepository {
    pool: Pool<Postgres>,
}

impl PaymentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List payments, enriched with student name
    pub async fn list(&self, query: &PaymentQuery) -> AppResult<Vec<Payment>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.student_id.is_some() {
            conditions.push(format!("p.student_id = ${}", idx));
            idx += 1;
        }
        if query.is_paid.is_some() {
            conditions.push(format!("p.is_paid = ${}", idx));
            idx += 1;
        }
        if query.period_year.is_some() {
            conditions.push(format!("p.period_year = ${}", idx));
            idx += 1;
        }
        if query.period_month.is_some() {
            conditions.push(format!("p.period_month = ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            r#"
            SELECT p.*, s.name || ' ' || s.surname as student_name
            FROM payments p
            JOIN students s ON p.student_id = s.id
            {}
            ORDER BY p.period_year DESC NULLS LAST, p.period_month DESC NULLS LAST, p.id DESC
            "#,
            where_clause
        );

        let mut q = sqlx::query_as::<_, Payment>(&sql);
        if let Some(v) = query.student_id {
            q = q.bind(v);
        }
        if let Some(v) = query.is_paid {
            q = q.bind(v);
        }
        if let Some(v) = query.period_year {
            q = q.bind(v);
        }
        if let Some(v) = query.period_month {
            q = q.bind(v);
        }

        Ok(q.fetch_all(&self.pool).await?)
    }

    /// Get payment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Payment> {
        sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Payment with id {} not found", id)))
    }

    /// Create a payment
    pub async fn create(&self, data: &CreatePayment) -> AppResult<Payment> {
        let row = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments
                (student_id, sport_branch_id, equipment_assignment_id, amount,
                 period_year, period_month, payment_period, is_paid, payment_method, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(data.student_id)
        .bind(data.sport_branch_id)
        .bind(data.equipment_assignment_id)
        .bind(data.amount)
        .bind(data.period_year)
        .bind(data.period_month)
        .bind(&data.payment_period)
        .bind(data.is_paid.unwrap_or(false))
        .bind(&data.payment_method)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a payment; only the allow-listed fields are touched
    pub async fn update(&self, id: i32, data: &UpdatePayment) -> AppResult<Payment> {
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

        add_field!(data.amount, "amount");
        add_field!(data.is_paid, "is_paid");
        add_field!(data.payment_method, "payment_method");
        add_field!(data.notes, "notes");

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let sql = format!(
            "UPDATE payments SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut q = sqlx::query_as::<_, Payment>(&sql);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    q = q.bind(val);
                }
            };
        }

        bind_field!(data.amount);
        bind_field!(data.is_paid);
        bind_field!(data.payment_method);
        bind_field!(data.notes);

        q.bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Payment with id {} not found", id)))
    }

    /// Delete a payment
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Payment with id {} not found", id)));
        }
        Ok(())
    }

    /// All unpaid payments for one student
    pub async fn list_unpaid(&self, student_id: i32) -> AppResult<Vec<Payment>> {
        let rows = sqlx::query_as::<_, Payment>(
            r#"
            SELECT * FROM payments
            WHERE student_id = $1 AND is_paid = FALSE
            ORDER BY id
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Set one amount on a batch of payment rows
    pub async fn bulk_update_amount(&self, ids: &[i32], amount: Decimal) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("UPDATE payments SET amount = $1 WHERE id = ANY($2)")
            .bind(amount)
            .bind(ids)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// The unpaid fee payment linked to one assignment, if any
    pub async fn find_unpaid_by_assignment(&self, assignment_id: i32) -> AppResult<Option<Payment>> {
        let row = sqlx::query_as::<_, Payment>(
            r#"
            SELECT * FROM payments
            WHERE equipment_assignment_id = $1 AND is_paid = FALSE
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(assignment_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// A student's recent unpaid equipment-method payments, newest first
    pub async fn list_recent_unpaid_equipment(
        &self,
        student_id: i32,
        limit: i64,
    ) -> AppResult<Vec<Payment>> {
        let rows = sqlx::query_as::<_, Payment>(
            r#"
            SELECT * FROM payments
            WHERE student_id = $1 AND is_paid = FALSE AND payment_method = 'equipment'
            ORDER BY id DESC
            LIMIT $2
            "#,
        )
        .bind(student_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
