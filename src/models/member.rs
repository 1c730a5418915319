//! Borrower and librarian models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Membership status of a borrower
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "membership_status", rename_all = "lowercase")]
pub enum MembershipStatus {
    Active,
    Frozen,
    Expired,
}

/// Borrower
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Borrower {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub membership_status: MembershipStatus,
    pub membership_expiry: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Borrower {
    /// Whether the borrower may take out new items on `date`
    pub fn ensure_can_borrow(&self, date: NaiveDate) -> AppResult<()> {
        match self.membership_status {
            MembershipStatus::Frozen => {
                return Err(AppError::BusinessRule(format!(
                    "Borrower {} has a frozen account",
                    self.id
                )))
            }
            MembershipStatus::Expired => {
                return Err(AppError::BusinessRule(format!(
                    "Borrower {} membership has expired",
                    self.id
                )))
            }
            MembershipStatus::Active => {}
        }

        match self.membership_expiry {
            Some(expiry) if expiry < date => Err(AppError::BusinessRule(format!(
                "Borrower {} membership expired on {}",
                self.id, expiry
            ))),
            _ => Ok(()),
        }
    }
}

/// Librarian
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Librarian {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create borrower request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBorrower {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub membership_expiry: Option<NaiveDate>,
}

/// Update membership request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMembership {
    pub membership_status: MembershipStatus,
    pub membership_expiry: Option<NaiveDate>,
}

/// Create librarian request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLibrarian {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Member search query
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct MemberQuery {
    /// Case-insensitive name search
    pub name: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn borrower(status: MembershipStatus, expiry: Option<NaiveDate>) -> Borrower {
        Borrower {
            id: 5,
            name: "Ada".to_string(),
            email: None,
            membership_status: status,
            membership_expiry: expiry,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_active_borrower_can_borrow() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(borrower(MembershipStatus::Active, None).ensure_can_borrow(today).is_ok());
        assert!(borrower(MembershipStatus::Active, Some(today))
            .ensure_can_borrow(today)
            .is_ok());
    }

    #[test]
    fn test_frozen_or_lapsed_borrower_is_refused() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();

        for b in [
            borrower(MembershipStatus::Frozen, None),
            borrower(MembershipStatus::Expired, None),
            borrower(MembershipStatus::Active, Some(yesterday)),
        ] {
            assert!(matches!(b.ensure_can_borrow(today), Err(AppError::BusinessRule(_))));
        }
    }
}
