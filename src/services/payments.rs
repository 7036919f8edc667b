//! Payment management and recalculation

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::{
    error::AppResult,
    models::{
        activity::NewActivity,
        equipment::{EquipmentAssignment, EquipmentType},
        payment::{
            is_current_or_future, BillingPeriod, CreatePayment, Payment, PaymentQuery,
            UpdatePayment,
        },
        student::Student,
    },
    repository::Repository,
    services::activity::ActivityService,
};

/// Fee applied when a student's branch cannot be resolved
const FALLBACK_MONTHLY_FEE: i64 = 500;

/// Lookback window for matching an equipment fee payment without a linked
/// assignment id
const EQUIPMENT_MATCH_WINDOW: i64 = 10;

/// Tolerance for matching an equipment fee payment by amount
const AMOUNT_TOLERANCE_MILLIS: i64 = 5; // 0.005

/// Monthly amount after discount, rounded to 2 decimals.
pub fn discounted_fee(fee: Decimal, discount_rate: Decimal) -> Decimal {
    let factor = Decimal::ONE - discount_rate / Decimal::from(100);
    (fee * factor).round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Whether two amounts match within the 0.005 tolerance.
pub fn amounts_match(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() < Decimal::new(AMOUNT_TOLERANCE_MILLIS, 3)
}

#[derive(Clone)]
pub struct PaymentsService {
    repository: Repository,
    activity: ActivityService,
}

impl PaymentsService {
    pub fn new(repository: Repository, activity: ActivityService) -> Self {
        Self { repository, activity }
    }

    /// List payments
    pub async fn list(&self, query: &PaymentQuery) -> AppResult<Vec<Payment>> {
        self.repository.payments.list(query).await
    }

    /// Get payment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Payment> {
        self.repository.payments.get_by_id(id).await
    }

    /// Create a payment
    pub async fn create(&self, data: CreatePayment) -> AppResult<Payment> {
        // Verify student exists
        self.repository.students.get_by_id(data.student_id).await?;
        let payment = self.repository.payments.create(&data).await?;

        self.activity.record(
            NewActivity::new("create", "payment")
                .entity_id(payment.id)
                .description(format!("Payment of {} for student {}", payment.amount, payment.student_id)),
        );
        Ok(payment)
    }

    /// Update a payment
    pub async fn update(&self, id: i32, data: UpdatePayment) -> AppResult<Payment> {
        self.repository.payments.update(id, &data).await
    }

    /// Delete a payment
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.payments.delete(id).await?;
        self.activity.record(NewActivity::new("delete", "payment").entity_id(id));
        Ok(())
    }

    /// Monthly fee for a student: branch by id, else branch by name
    /// (case-insensitively), else the fixed fallback.
    async fn resolve_monthly_fee(&self, student: &Student) -> AppResult<(Option<i32>, Decimal)> {
        if let Some(branch_id) = student.sport_branch_id {
            if let Ok(branch) = self.repository.branches.get_by_id(branch_id).await {
                return Ok((Some(branch.id), branch.monthly_fee));
            }
        }
        if let Some(ref name) = student.sport_branch {
            if let Some(branch) = self.repository.branches.get_by_name(name).await? {
                return Ok((Some(branch.id), branch.monthly_fee));
            }
        }
        Ok((None, Decimal::from(FALLBACK_MONTHLY_FEE)))
    }

    /// Recompute the fee of all unpaid current-or-future monthly payments of
    /// one student, after a discount-rate or branch change. Re-running with
    /// unchanged inputs reproduces the same amounts.
    pub async fn recalculate_for_student(&self, student_id: i32) -> AppResult<u64> {
        let student = self.repository.students.get_by_id(student_id).await?;
        let (_, fee) = self.resolve_monthly_fee(&student).await?;
        let new_amount = discounted_fee(fee, student.discount_rate);

        let reference = BillingPeriod::current();
        let ids: Vec<i32> = self
            .repository
            .payments
            .list_unpaid(student_id)
            .await?
            .into_iter()
            .filter(|p| {
                !p.is_equipment_fee()
                    && is_current_or_future(
                        p.period_year,
                        p.period_month,
                        p.payment_period.as_deref(),
                        reference,
                    )
            })
            .map(|p| p.id)
            .collect();

        let updated = self.repository.payments.bulk_update_amount(&ids, new_amount).await?;

        self.activity.record(
            NewActivity::new("recalculate", "payment")
                .entity_id(student_id)
                .description(format!(
                    "Recalculated {} unpaid payment(s) to {} for student {}",
                    updated, new_amount, student_id
                )),
        );

        Ok(updated)
    }

    /// Create the single unpaid payment for a newly enrolled student's
    /// current calendar period.
    pub async fn create_enrollment_payment(&self, student: &Student) -> AppResult<Payment> {
        let (branch_id, fee) = self.resolve_monthly_fee(student).await?;
        let amount = discounted_fee(fee, student.discount_rate);

        let now = chrono::Utc::now();
        let payment = self
            .repository
            .payments
            .create(&CreatePayment {
                student_id: student.id,
                sport_branch_id: branch_id,
                equipment_assignment_id: None,
                amount,
                period_year: Some(now.year()),
                period_month: Some(now.month() as i32),
                payment_period: Some(format!("{:04}-{:02}", now.year(), now.month())),
                is_paid: Some(false),
                payment_method: None,
                notes: None,
            })
            .await?;

        self.activity.record(
            NewActivity::new("enroll", "payment")
                .entity_id(payment.id)
                .description(format!(
                    "Initial payment of {} for student {} {}",
                    amount, student.name, student.surname
                )),
        );

        Ok(payment)
    }

    /// Charge the equipment fee of a fresh assignment as an unpaid payment.
    pub async fn create_assignment_fee(
        &self,
        assignment: &EquipmentAssignment,
        equipment: &EquipmentType,
    ) -> AppResult<Option<Payment>> {
        let Some(fee) = equipment.fee else {
            return Ok(None);
        };

        let amount = (fee * Decimal::from(assignment.quantity))
            .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);

        let payment = self
            .repository
            .payments
            .create(&CreatePayment {
                student_id: assignment.student_id,
                sport_branch_id: None,
                equipment_assignment_id: Some(assignment.id),
                amount,
                period_year: None,
                period_month: None,
                payment_period: None,
                is_paid: Some(false),
                payment_method: Some("equipment".to_string()),
                notes: Some(format!("Equipment fee: {}", equipment.name)),
            })
            .await?;

        Ok(Some(payment))
    }

    /// Cancel the unpaid fee payment of a returned assignment. Matching is
    /// tried by linked assignment id first, then by amount (0.005 tolerance)
    /// or note text among the student's recent unpaid equipment payments.
    /// At most one payment is deleted; no match is not an error.
    pub async fn cancel_assignment_fee(
        &self,
        assignment: &EquipmentAssignment,
        equipment: &EquipmentType,
    ) -> AppResult<Option<i32>> {
        let linked = self
            .repository
            .payments
            .find_unpaid_by_assignment(assignment.id)
            .await?;

        let target = if let Some(payment) = linked {
            Some(payment)
        } else {
            let expected = equipment
                .fee
                .map(|f| {
                    (f * Decimal::from(assignment.quantity)).round_dp_with_strategy(
                        2,
                        rust_decimal::RoundingStrategy::MidpointAwayFromZero,
                    )
                });

            self.repository
                .payments
                .list_recent_unpaid_equipment(assignment.student_id, EQUIPMENT_MATCH_WINDOW)
                .await?
                .into_iter()
                .find(|p| {
                    let amount_hit = expected.map(|e| amounts_match(p.amount, e)).unwrap_or(false);
                    let note_hit = p
                        .notes
                        .as_deref()
                        .map(|n| n.to_lowercase().contains(&equipment.name.to_lowercase()))
                        .unwrap_or(false);
                    amount_hit || note_hit
                })
        };

        match target {
            Some(payment) => {
                self.repository.payments.delete(payment.id).await?;
                self.activity.record(
                    NewActivity::new("cancel", "payment")
                        .entity_id(payment.id)
                        .description(format!(
                            "Cancelled unpaid equipment fee for assignment {}",
                            assignment.id
                        )),
                );
                Ok(Some(payment.id))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_discounted_fee_basic() {
        assert_eq!(discounted_fee(dec!(1000), dec!(20)), dec!(800.00));
        assert_eq!(discounted_fee(dec!(1000), dec!(0)), dec!(1000.00));
        assert_eq!(discounted_fee(dec!(1000), dec!(100)), dec!(0.00));
    }

    #[test]
    fn test_discounted_fee_rounds_to_two_decimals() {
        // 333.33 * 0.85 = 283.3305
        assert_eq!(discounted_fee(dec!(333.33), dec!(15)), dec!(283.33));
        // 100 * 0.665 = 66.50
        assert_eq!(discounted_fee(dec!(100), dec!(33.5)), dec!(66.50));
    }

    #[test]
    fn test_discounted_fee_idempotent_inputs() {
        let first = discounted_fee(dec!(750), dec!(12.5));
        let second = discounted_fee(dec!(750), dec!(12.5));
        assert_eq!(first, second);
    }

    #[test]
    fn test_amounts_match_tolerance() {
        assert!(amounts_match(dec!(100.00), dec!(100.00)));
        assert!(amounts_match(dec!(100.004), dec!(100.00)));
        assert!(!amounts_match(dec!(100.005), dec!(100.00)));
        assert!(!amounts_match(dec!(99.99), dec!(100.00)));
    }
}
