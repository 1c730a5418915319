//! Borrowing model and related types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::paging;
use crate::{
    config::LoanPolicy,
    error::{AppError, AppResult},
    lifecycle,
};

/// Borrowing status. Only `borrowed` and `returned` are ever written;
/// `overdue` is derived on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "borrowing_status", rename_all = "lowercase")]
pub enum BorrowingStatus {
    Borrowed,
    Overdue,
    Returned,
}

impl BorrowingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorrowingStatus::Borrowed => "borrowed",
            BorrowingStatus::Overdue => "overdue",
            BorrowingStatus::Returned => "returned",
        }
    }
}

impl std::fmt::Display for BorrowingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single catalog item a borrowing refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemRef {
    Book(i32),
    ResearchPaper(i32),
}

impl ItemRef {
    /// Build from the two optional references of a request.
    /// Exactly one of them must be set.
    pub fn from_parts(book_id: Option<i32>, research_id: Option<i32>) -> AppResult<Self> {
        match (book_id, research_id) {
            (Some(id), None) => Ok(ItemRef::Book(id)),
            (None, Some(id)) => Ok(ItemRef::ResearchPaper(id)),
            (Some(_), Some(_)) => Err(AppError::Validation(
                "A borrowing references either a book or a research paper, not both".to_string(),
            )),
            (None, None) => Err(AppError::Validation(
                "book_id or research_id required".to_string(),
            )),
        }
    }

    pub fn id(&self) -> i32 {
        match self {
            ItemRef::Book(id) | ItemRef::ResearchPaper(id) => *id,
        }
    }

    pub fn book_id(&self) -> Option<i32> {
        match self {
            ItemRef::Book(id) => Some(*id),
            ItemRef::ResearchPaper(_) => None,
        }
    }

    pub fn research_id(&self) -> Option<i32> {
        match self {
            ItemRef::ResearchPaper(id) => Some(*id),
            ItemRef::Book(_) => None,
        }
    }

    /// Table owning the item's copy counter
    pub fn table(&self) -> &'static str {
        match self {
            ItemRef::Book(_) => "books",
            ItemRef::ResearchPaper(_) => "research_papers",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemRef::Book(_) => "Book",
            ItemRef::ResearchPaper(_) => "Research paper",
        }
    }
}

/// Borrowing row as stored in the database
#[derive(Debug, Clone, FromRow)]
pub struct BorrowingRow {
    pub id: i32,
    pub borrower_id: i32,
    pub librarian_id: i32,
    pub book_id: Option<i32>,
    pub research_id: Option<i32>,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<DateTime<Utc>>,
    pub status: BorrowingStatus,
    pub rating: Option<i16>,
    pub review: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Borrowing model
#[derive(Debug, Clone, PartialEq)]
pub struct Borrowing {
    pub id: i32,
    pub borrower_id: i32,
    pub librarian_id: i32,
    pub item: ItemRef,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<DateTime<Utc>>,
    pub rating: Option<i16>,
    pub review: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<BorrowingRow> for Borrowing {
    type Error = AppError;

    fn try_from(row: BorrowingRow) -> Result<Self, Self::Error> {
        let item = ItemRef::from_parts(row.book_id, row.research_id).map_err(|_| {
            AppError::Internal(format!("Borrowing {} has an invalid item reference", row.id))
        })?;

        // Stored status only ever tracks whether a return was recorded
        let consistent = match row.status {
            BorrowingStatus::Borrowed => row.return_date.is_none(),
            BorrowingStatus::Returned => row.return_date.is_some(),
            BorrowingStatus::Overdue => false,
        };
        if !consistent {
            return Err(AppError::Internal(format!(
                "Borrowing {} has stored status {} inconsistent with its return date",
                row.id, row.status
            )));
        }

        Ok(Self {
            id: row.id,
            borrower_id: row.borrower_id,
            librarian_id: row.librarian_id,
            item,
            borrow_date: row.borrow_date,
            due_date: row.due_date,
            return_date: row.return_date,
            rating: row.rating,
            review: row.review,
            created_at: row.created_at,
        })
    }
}

impl Borrowing {
    pub fn returned_on(&self) -> Option<NaiveDate> {
        self.return_date.map(|d| d.date_naive())
    }

    /// Status as seen on `today`
    pub fn status_on(&self, today: NaiveDate) -> BorrowingStatus {
        lifecycle::derive_status(self.due_date, self.returned_on(), today)
    }

    /// Display view with derived status and fine
    pub fn details(&self, today: NaiveDate, policy: &LoanPolicy) -> BorrowingDetails {
        let fine = lifecycle::assess_fine(self.due_date, self.returned_on(), today, policy);

        BorrowingDetails {
            id: self.id,
            borrower_id: self.borrower_id,
            librarian_id: self.librarian_id,
            book_id: self.item.book_id(),
            research_id: self.item.research_id(),
            borrow_date: self.borrow_date,
            due_date: self.due_date,
            return_date: self.return_date,
            status: self.status_on(today),
            rating: self.rating,
            review: self.review.clone(),
            created_at: self.created_at,
            days_overdue: fine.days_overdue,
            fine: fine.amount,
            escalate_account: fine.escalate_account,
        }
    }
}

/// Borrowing with derived values for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BorrowingDetails {
    pub id: i32,
    pub borrower_id: i32,
    pub librarian_id: i32,
    pub book_id: Option<i32>,
    pub research_id: Option<i32>,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<DateTime<Utc>>,
    pub status: BorrowingStatus,
    pub rating: Option<i16>,
    pub review: Option<String>,
    pub created_at: DateTime<Utc>,
    pub days_overdue: i64,
    /// Computed on read, never stored
    #[schema(value_type = String)]
    pub fine: Decimal,
    pub escalate_account: bool,
}

/// Create borrowing request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBorrowing {
    pub borrower_id: i32,
    pub librarian_id: i32,
    pub book_id: Option<i32>,
    pub research_id: Option<i32>,
    /// Defaults to today
    pub borrow_date: Option<NaiveDate>,
}

/// Return borrowing request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ReturnBorrowing {
    /// Accepted wide so out-of-range values reach the bounds check
    pub rating: Option<i64>,
    #[validate(length(max = 2000, message = "Review must be at most 2000 characters"))]
    pub review: Option<String>,
}

/// Validated borrowing ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewBorrowing {
    pub borrower_id: i32,
    pub librarian_id: i32,
    pub item: ItemRef,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    /// Refuse borrowers whose membership does not allow new loans
    pub check_standing: bool,
}

/// Values written when a borrowing is returned
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnRecord {
    pub returned_at: DateTime<Utc>,
    pub rating: Option<i16>,
    pub review: Option<String>,
}

/// Borrowing list filter
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BorrowingQuery {
    pub borrower_id: Option<i32>,
    pub librarian_id: Option<i32>,
    pub book_id: Option<i32>,
    pub research_id: Option<i32>,
    /// Derived status
    pub status: Option<BorrowingStatus>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl BorrowingQuery {
    pub fn page(&self) -> i64 {
        paging(self.page, self.per_page).0
    }

    pub fn per_page(&self) -> i64 {
        paging(self.page, self.per_page).1
    }

    pub fn offset(&self) -> i64 {
        paging(self.page, self.per_page).2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(book_id: Option<i32>, research_id: Option<i32>) -> BorrowingRow {
        BorrowingRow {
            id: 1,
            borrower_id: 2,
            librarian_id: 3,
            book_id,
            research_id,
            borrow_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            return_date: None,
            status: BorrowingStatus::Borrowed,
            rating: None,
            review: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_item_ref_exactly_one() {
        assert_eq!(ItemRef::from_parts(Some(42), None).unwrap(), ItemRef::Book(42));
        assert_eq!(ItemRef::from_parts(None, Some(7)).unwrap(), ItemRef::ResearchPaper(7));
        assert!(matches!(ItemRef::from_parts(Some(1), Some(2)), Err(AppError::Validation(_))));
        assert!(matches!(ItemRef::from_parts(None, None), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_item_ref_columns() {
        let book = ItemRef::Book(42);
        assert_eq!((book.book_id(), book.research_id()), (Some(42), None));
        assert_eq!(book.table(), "books");

        let paper = ItemRef::ResearchPaper(7);
        assert_eq!((paper.book_id(), paper.research_id()), (None, Some(7)));
        assert_eq!(paper.table(), "research_papers");
    }

    #[test]
    fn test_row_with_both_references_is_rejected() {
        assert!(matches!(
            Borrowing::try_from(row(Some(1), Some(2))),
            Err(AppError::Internal(_))
        ));
        assert!(Borrowing::try_from(row(None, None)).is_err());
        assert_eq!(Borrowing::try_from(row(Some(42), None)).unwrap().item, ItemRef::Book(42));
    }

    #[test]
    fn test_row_status_must_match_return_date() {
        let returned_at = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();

        let returned = BorrowingRow {
            return_date: Some(returned_at),
            status: BorrowingStatus::Returned,
            ..row(Some(42), None)
        };
        assert!(Borrowing::try_from(returned).is_ok());

        let stale = BorrowingRow {
            return_date: Some(returned_at),
            ..row(Some(42), None)
        };
        assert!(matches!(Borrowing::try_from(stale), Err(AppError::Internal(_))));

        let missing_date = BorrowingRow {
            status: BorrowingStatus::Returned,
            ..row(Some(42), None)
        };
        assert!(matches!(Borrowing::try_from(missing_date), Err(AppError::Internal(_))));

        let stored_overdue = BorrowingRow {
            status: BorrowingStatus::Overdue,
            ..row(Some(42), None)
        };
        assert!(matches!(Borrowing::try_from(stored_overdue), Err(AppError::Internal(_))));
    }

    #[test]
    fn test_details_derive_overdue() {
        let borrowing = Borrowing::try_from(row(Some(42), None)).unwrap();
        let details = borrowing.details(
            NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
            &LoanPolicy::default(),
        );
        assert_eq!(details.status, BorrowingStatus::Overdue);
        assert_eq!(details.days_overdue, 1);
        assert_eq!(details.fine, Decimal::new(25, 2));
        assert_eq!(details.book_id, Some(42));
        assert_eq!(details.research_id, None);
    }

    #[test]
    fn test_query_pagination_bounds() {
        let query = BorrowingQuery {
            page: Some(0),
            per_page: Some(500),
            ..Default::default()
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.per_page(), 100);
        assert_eq!(query.offset(), 0);

        let query = BorrowingQuery {
            page: Some(3),
            ..Default::default()
        };
        assert_eq!(query.offset(), 40);

        let query = BorrowingQuery {
            page: Some(i64::MAX),
            per_page: Some(100),
            ..Default::default()
        };
        assert_eq!(query.offset(), i64::MAX);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(BorrowingStatus::Overdue).unwrap(),
            serde_json::json!("overdue")
        );
    }
}
