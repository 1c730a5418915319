//! Borrowing lifecycle rules: due dates, derived status and overdue fines.
//!
//! Everything here is a pure function of dates and the [`LoanPolicy`]. Overdue
//! status is never persisted; it is derived on every read so that there is a
//! single place deciding whether a borrowing is late.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::{
    config::LoanPolicy,
    error::{AppError, AppResult},
    models::borrowing::BorrowingStatus,
};

const DAYS_PER_TIER: i64 = 7;

/// Due date for a borrowing starting on `borrow_date`
pub fn due_date(borrow_date: NaiveDate, policy: &LoanPolicy) -> AppResult<NaiveDate> {
    borrow_date
        .checked_add_signed(Duration::days(policy.loan_period_days))
        .ok_or_else(|| {
            AppError::Validation(format!("Borrow date {} is out of range", borrow_date))
        })
}

/// Status of a borrowing as seen on `today`.
///
/// A recorded return always wins, whether it happened before or after the due
/// date. Without one, the borrowing turns overdue the day after its due date.
pub fn derive_status(
    due_date: NaiveDate,
    returned_on: Option<NaiveDate>,
    today: NaiveDate,
) -> BorrowingStatus {
    if returned_on.is_some() {
        BorrowingStatus::Returned
    } else if today > due_date {
        BorrowingStatus::Overdue
    } else {
        BorrowingStatus::Borrowed
    }
}

/// Rejects ratings outside the policy bounds, narrowing the accepted value
/// to the stored width
pub fn check_rating(rating: Option<i64>, policy: &LoanPolicy) -> AppResult<Option<i16>> {
    let Some(r) = rating else {
        return Ok(None);
    };

    let out_of_range = || {
        AppError::Validation(format!(
            "Rating must be between {} and {}, got {}",
            policy.rating_min, policy.rating_max, r
        ))
    };

    if r < i64::from(policy.rating_min) || r > i64::from(policy.rating_max) {
        return Err(out_of_range());
    }
    i16::try_from(r).map(Some).map_err(|_| out_of_range())
}

/// Computed fine for a borrowing. Display only, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FineAssessment {
    pub days_overdue: i64,
    pub amount: Decimal,
    /// Borrowing is still out and past the escalation threshold
    pub escalate_account: bool,
}

/// Tiered fine: first week at the first rate, second week at the second, every
/// day after that at the third. No grace period.
///
/// Lateness is measured up to the return date when there is one, otherwise up
/// to `today`.
pub fn assess_fine(
    due_date: NaiveDate,
    returned_on: Option<NaiveDate>,
    today: NaiveDate,
    policy: &LoanPolicy,
) -> FineAssessment {
    let end = returned_on.unwrap_or(today);
    let days_overdue = (end - due_date).num_days().max(0);

    let first = days_overdue.min(DAYS_PER_TIER);
    let second = (days_overdue - DAYS_PER_TIER).clamp(0, DAYS_PER_TIER);
    let rest = (days_overdue - 2 * DAYS_PER_TIER).max(0);

    let amount = policy.first_week_rate * Decimal::from(first)
        + policy.second_week_rate * Decimal::from(second)
        + policy.third_week_rate * Decimal::from(rest);

    FineAssessment {
        days_overdue,
        amount,
        escalate_account: returned_on.is_none() && days_overdue > policy.escalation_after_days,
    }
}
