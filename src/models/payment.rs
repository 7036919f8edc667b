//! Payment model and billing-period classification

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Payment row. Monthly obligations carry a (student, period) pair;
/// equipment fees carry `payment_method = 'equipment'` or a non-null
/// `equipment_assignment_id`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Payment {
    pub id: i32,
    pub student_id: i32,
    pub sport_branch_id: Option<i32>,
    pub equipment_assignment_id: Option<i32>,
    pub amount: Decimal,
    pub period_year: Option<i32>,
    pub period_month: Option<i32>,
    /// Legacy "YYYY-MM" period string, consulted when the numeric pair is absent
    pub payment_period: Option<String>,
    pub is_paid: bool,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    #[sqlx(default)]
    pub student_name: Option<String>,
}

impl Payment {
    /// Equipment-fee rows are excluded from monthly recalculation.
    pub fn is_equipment_fee(&self) -> bool {
        self.equipment_assignment_id.is_some()
            || self.payment_method.as_deref() == Some("equipment")
    }
}

/// Create payment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePayment {
    pub student_id: i32,
    pub sport_branch_id: Option<i32>,
    pub equipment_assignment_id: Option<i32>,
    pub amount: Decimal,
    pub period_year: Option<i32>,
    #[validate(range(min = 1, max = 12))]
    pub period_month: Option<i32>,
    pub payment_period: Option<String>,
    pub is_paid: Option<bool>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
}

/// Update payment request (explicit allow-list of mutable fields)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePayment {
    pub amount: Option<Decimal>,
    pub is_paid: Option<bool>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
}

/// Payment list filter
#[derive(Debug, Deserialize, IntoParams)]
pub struct PaymentQuery {
    pub student_id: Option<i32>,
    pub is_paid: Option<bool>,
    pub period_year: Option<i32>,
    pub period_month: Option<i32>,
}

/// One calendar billing period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingPeriod {
    pub year: i32,
    pub month: u32,
}

impl BillingPeriod {
    pub fn current() -> Self {
        let now = Utc::now();
        Self { year: now.year(), month: now.month() }
    }

    /// Parse a legacy "YYYY-MM" period string.
    pub fn parse(s: &str) -> Option<Self> {
        let (y, m) = s.trim().split_once('-')?;
        let year: i32 = y.parse().ok()?;
        let month: u32 = m.parse().ok()?;
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }
}

/// Whether a payment row belongs to `reference` or a later period.
///
/// Numeric `(period_year, period_month)` wins when both are present; a legacy
/// "YYYY-MM" string is the fallback; a row with no usable period data is
/// treated as current and therefore matched.
pub fn is_current_or_future(
    period_year: Option<i32>,
    period_month: Option<i32>,
    payment_period: Option<&str>,
    reference: BillingPeriod,
) -> bool {
    let period = match (period_year, period_month) {
        (Some(y), Some(m)) if (1..=12).contains(&m) => {
            Some(BillingPeriod { year: y, month: m as u32 })
        }
        _ => payment_period.and_then(BillingPeriod::parse),
    };

    match period {
        Some(p) => p.year > reference.year || (p.year == reference.year && p.month >= reference.month),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REF: BillingPeriod = BillingPeriod { year: 2025, month: 6 };

    #[test]
    fn test_numeric_period_ordering() {
        assert!(is_current_or_future(Some(2025), Some(6), None, REF));
        assert!(is_current_or_future(Some(2025), Some(7), None, REF));
        assert!(is_current_or_future(Some(2026), Some(1), None, REF));
        assert!(!is_current_or_future(Some(2025), Some(5), None, REF));
        assert!(!is_current_or_future(Some(2024), Some(12), None, REF));
    }

    #[test]
    fn test_string_period_fallback() {
        assert!(is_current_or_future(None, None, Some("2025-06"), REF));
        assert!(is_current_or_future(None, None, Some("2025-12"), REF));
        assert!(!is_current_or_future(None, None, Some("2025-01"), REF));
    }

    #[test]
    fn test_missing_period_defaults_to_current() {
        assert!(is_current_or_future(None, None, None, REF));
        assert!(is_current_or_future(None, None, Some("not-a-period"), REF));
        // Half a numeric pair is not usable either
        assert!(is_current_or_future(Some(2024), None, None, REF));
    }

    #[test]
    fn test_equipment_fee_classification() {
        let mut payment = Payment {
            id: 1,
            student_id: 1,
            sport_branch_id: None,
            equipment_assignment_id: None,
            amount: Decimal::ZERO,
            period_year: Some(2025),
            period_month: Some(6),
            payment_period: None,
            is_paid: false,
            payment_method: None,
            notes: None,
            created_at: None,
            student_name: None,
        };
        assert!(!payment.is_equipment_fee());

        payment.payment_method = Some("equipment".to_string());
        assert!(payment.is_equipment_fee());

        payment.payment_method = Some("cash".to_string());
        payment.equipment_assignment_id = Some(7);
        assert!(payment.is_equipment_fee());
    }

    #[test]
    fn test_parse_period_string() {
        assert_eq!(BillingPeriod::parse("2025-09"), Some(BillingPeriod { year: 2025, month: 9 }));
        assert_eq!(BillingPeriod::parse(" 2025-1 "), Some(BillingPeriod { year: 2025, month: 1 }));
        assert_eq!(BillingPeriod::parse("2025-13"), None);
        assert_eq!(BillingPeriod::parse("202509"), None);
    }
}
