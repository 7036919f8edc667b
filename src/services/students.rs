//! Student management service

use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::{
        activity::NewActivity,
        payment::Payment,
        student::{CreateStudent, Student, StudentQuery, UpdateStudent},
    },
    repository::Repository,
    services::{activity::ActivityService, payments::PaymentsService},
};

#[derive(Clone)]
pub struct StudentsService {
    repository: Repository,
    payments: PaymentsService,
    activity: ActivityService,
}

impl StudentsService {
    pub fn new(repository: Repository, payments: PaymentsService, activity: ActivityService) -> Self {
        Self { repository, payments, activity }
    }

    fn check_discount(discount: Decimal) -> AppResult<()> {
        if discount < Decimal::ZERO || discount > Decimal::from(100) {
            return Err(AppError::Validation(
                "Discount rate must be between 0 and 100".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve a branch reference: explicit id wins, else name
    /// (case-insensitively). An unresolvable name is a validation error.
    async fn resolve_branch(
        &self,
        branch_id: Option<i32>,
        branch_name: Option<&str>,
    ) -> AppResult<Option<i32>> {
        if let Some(id) = branch_id {
            return Ok(Some(self.repository.branches.get_by_id(id).await?.id));
        }
        if let Some(name) = branch_name {
            return match self.repository.branches.get_by_name(name).await? {
                Some(branch) => Ok(Some(branch.id)),
                None => Err(AppError::Validation(format!("Unknown sport branch: {}", name))),
            };
        }
        Ok(None)
    }

    /// List students
    pub async fn list(&self, query: &StudentQuery) -> AppResult<Vec<Student>> {
        self.repository.students.list(query).await
    }

    /// Get student by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Student> {
        self.repository.students.get_by_id(id).await
    }

    /// Create a student
    pub async fn create(&self, data: CreateStudent) -> AppResult<Student> {
        let discount = data.discount_rate.unwrap_or(Decimal::ZERO);
        Self::check_discount(discount)?;
        let branch_id = self
            .resolve_branch(data.sport_branch_id, data.sport_branch.as_deref())
            .await?;

        let student = self.repository.students.create(&data, branch_id, discount).await?;

        self.activity.record(
            NewActivity::new("create", "student")
                .entity_id(student.id)
                .description(format!("Created student {} {}", student.name, student.surname)),
        );
        Ok(student)
    }

    /// Enroll a student: create the row and the single unpaid payment for
    /// the current calendar period.
    pub async fn enroll(&self, data: CreateStudent) -> AppResult<(Student, Payment)> {
        let student = self.create(data).await?;
        // Re-read for the denormalized branch name used in fee resolution
        let student = self.repository.students.get_by_id(student.id).await?;
        let payment = self.payments.create_enrollment_payment(&student).await?;
        Ok((student, payment))
    }

    /// Update a student. A discount-rate or branch change triggers the
    /// recalculation of the student's unpaid future payments.
    pub async fn update(&self, id: i32, data: UpdateStudent) -> AppResult<Student> {
        if let Some(discount) = data.discount_rate {
            Self::check_discount(discount)?;
        }
        let branch_id = self
            .resolve_branch(data.sport_branch_id, data.sport_branch.as_deref())
            .await?;

        let before = self.repository.students.get_by_id(id).await?;
        let student = self.repository.students.update(id, &data, branch_id).await?;

        let fee_inputs_changed = data
            .discount_rate
            .map(|d| d != before.discount_rate)
            .unwrap_or(false)
            || branch_id.map(|b| Some(b) != before.sport_branch_id).unwrap_or(false);

        if fee_inputs_changed {
            self.payments.recalculate_for_student(id).await?;
        }

        self.activity.record(
            NewActivity::new("update", "student")
                .entity_id(student.id)
                .description(format!("Updated student {} {}", student.name, student.surname)),
        );
        Ok(student)
    }

    /// Soft-delete a student
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.students.soft_delete(id).await?;
        self.activity.record(NewActivity::new("delete", "student").entity_id(id));
        Ok(())
    }
}
