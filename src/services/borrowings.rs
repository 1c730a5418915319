//! Borrowing lifecycle service

use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    config::LoanPolicy,
    error::AppResult,
    lifecycle,
    models::borrowing::{
        BorrowingDetails, BorrowingQuery, CreateBorrowing, ItemRef, NewBorrowing, ReturnBorrowing,
        ReturnRecord,
    },
    repository::BorrowingStore,
};

#[derive(Clone)]
pub struct BorrowingsService {
    store: Arc<dyn BorrowingStore>,
    policy: LoanPolicy,
}

impl BorrowingsService {
    pub fn new(store: Arc<dyn BorrowingStore>, policy: LoanPolicy) -> Self {
        Self { store, policy }
    }

    /// Check out one book or research paper to a borrower
    pub async fn create_borrowing(&self, request: CreateBorrowing) -> AppResult<BorrowingDetails> {
        request.validate()?;
        let item = ItemRef::from_parts(request.book_id, request.research_id)?;

        let today = Utc::now().date_naive();
        let borrow_date = request.borrow_date.unwrap_or(today);
        let due_date = lifecycle::due_date(borrow_date, &self.policy)?;

        let borrowing = self
            .store
            .insert(NewBorrowing {
                borrower_id: request.borrower_id,
                librarian_id: request.librarian_id,
                item,
                borrow_date,
                due_date,
                check_standing: self.policy.enforce_borrower_standing,
            })
            .await?;

        tracing::info!(
            borrowing_id = borrowing.id,
            borrower_id = borrowing.borrower_id,
            item = ?borrowing.item,
            due_date = %borrowing.due_date,
            "Borrowing created"
        );

        Ok(borrowing.details(today, &self.policy))
    }

    /// Record a return. A borrowing can only be returned once.
    pub async fn return_borrowing(
        &self,
        borrowing_id: i32,
        request: ReturnBorrowing,
    ) -> AppResult<BorrowingDetails> {
        request.validate()?;
        let rating = lifecycle::check_rating(request.rating, &self.policy)?;

        let review = request
            .review
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        let now = Utc::now();
        let borrowing = self
            .store
            .mark_returned(
                borrowing_id,
                ReturnRecord {
                    returned_at: now,
                    rating,
                    review,
                },
            )
            .await?;

        let details = borrowing.details(now.date_naive(), &self.policy);

        tracing::info!(
            borrowing_id = borrowing.id,
            item = ?borrowing.item,
            days_overdue = details.days_overdue,
            "Borrowing returned"
        );

        Ok(details)
    }

    /// Get a borrowing by ID
    pub async fn get_borrowing(&self, borrowing_id: i32) -> AppResult<BorrowingDetails> {
        let borrowing = self.store.get_by_id(borrowing_id).await?;
        Ok(borrowing.details(Utc::now().date_naive(), &self.policy))
    }

    /// List borrowings matching the filter, with the total count
    pub async fn list_borrowings(
        &self,
        query: &BorrowingQuery,
    ) -> AppResult<(Vec<BorrowingDetails>, i64)> {
        let today = Utc::now().date_naive();
        let (borrowings, total) = self.store.search(query, today).await?;

        let details = borrowings
            .iter()
            .map(|b| b.details(today, &self.policy))
            .collect();

        Ok((details, total))
    }

    /// All borrowings of one borrower, newest first
    pub async fn get_borrower_borrowings(
        &self,
        borrower_id: i32,
        query: BorrowingQuery,
    ) -> AppResult<(Vec<BorrowingDetails>, i64)> {
        self.store.find_borrower(borrower_id).await?;

        let query = BorrowingQuery {
            borrower_id: Some(borrower_id),
            ..query
        };
        self.list_borrowings(&query).await
    }
}
