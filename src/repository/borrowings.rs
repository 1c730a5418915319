//! Borrowings repository for database operations

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, AppResult},
    models::{
        borrowing::{
            Borrowing, BorrowingQuery, BorrowingRow, BorrowingStatus, NewBorrowing, ReturnRecord,
        },
        member::Borrower,
    },
};

/// Persistence seam for the borrowing lifecycle.
///
/// `insert` and `mark_returned` each run as one transaction covering the
/// borrowing row and the item's available-copy counter. `insert` also checks
/// the borrower's standing inside that transaction when asked to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BorrowingStore: Send + Sync {
    async fn find_borrower(&self, borrower_id: i32) -> AppResult<Borrower>;
    async fn insert(&self, borrowing: NewBorrowing) -> AppResult<Borrowing>;
    async fn mark_returned(&self, borrowing_id: i32, record: ReturnRecord) -> AppResult<Borrowing>;
    async fn get_by_id(&self, borrowing_id: i32) -> AppResult<Borrowing>;
    async fn search(
        &self,
        query: &BorrowingQuery,
        today: NaiveDate,
    ) -> AppResult<(Vec<Borrowing>, i64)>;
}

#[derive(Clone)]
pub struct BorrowingsRepository {
    pool: Pool<Postgres>,
}

impl BorrowingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Start a query over `borrowings` with the filter's WHERE clause applied
fn filtered<'a>(select: &str, query: &BorrowingQuery, today: NaiveDate) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new(select);
    builder.push(" WHERE 1 = 1");

    if let Some(id) = query.borrower_id {
        builder.push(" AND borrower_id = ").push_bind(id);
    }
    if let Some(id) = query.librarian_id {
        builder.push(" AND librarian_id = ").push_bind(id);
    }
    if let Some(id) = query.book_id {
        builder.push(" AND book_id = ").push_bind(id);
    }
    if let Some(id) = query.research_id {
        builder.push(" AND research_id = ").push_bind(id);
    }

    // Mirrors lifecycle::derive_status
    match query.status {
        Some(BorrowingStatus::Returned) => {
            builder.push(" AND return_date IS NOT NULL");
        }
        Some(BorrowingStatus::Overdue) => {
            builder.push(" AND return_date IS NULL AND due_date < ").push_bind(today);
        }
        Some(BorrowingStatus::Borrowed) => {
            builder.push(" AND return_date IS NULL AND due_date >= ").push_bind(today);
        }
        None => {}
    }

    builder
}

#[async_trait]
impl BorrowingStore for BorrowingsRepository {
    async fn find_borrower(&self, borrower_id: i32) -> AppResult<Borrower> {
        sqlx::query_as::<_, Borrower>("SELECT * FROM borrowers WHERE id = $1")
            .bind(borrower_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrower with id {} not found", borrower_id)))
    }

    async fn insert(&self, borrowing: NewBorrowing) -> AppResult<Borrowing> {
        let item = borrowing.item;
        let mut tx = self.pool.begin().await?;

        // Share lock holds off membership changes until the checkout commits
        let borrower = sqlx::query_as::<_, Borrower>(
            "SELECT * FROM borrowers WHERE id = $1 FOR SHARE",
        )
        .bind(borrowing.borrower_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Borrower with id {} not found", borrowing.borrower_id))
        })?;
        if borrowing.check_standing {
            borrower.ensure_can_borrow(borrowing.borrow_date)?;
        }

        let librarian_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM librarians WHERE id = $1)")
                .bind(borrowing.librarian_id)
                .fetch_one(&mut *tx)
                .await?;
        if !librarian_exists {
            return Err(AppError::NotFound(format!(
                "Librarian with id {} not found",
                borrowing.librarian_id
            )));
        }

        // Lock the item row so concurrent checkouts see the same counter
        let available = sqlx::query_scalar::<_, i32>(&format!(
            "SELECT available_copies FROM {} WHERE id = $1 FOR UPDATE",
            item.table()
        ))
        .bind(item.id())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} with id {} not found", item.label(), item.id())))?;

        if available <= 0 {
            return Err(AppError::Conflict(format!(
                "{} {} has no available copies",
                item.label(),
                item.id()
            )));
        }

        sqlx::query(&format!(
            "UPDATE {} SET available_copies = available_copies - 1 WHERE id = $1",
            item.table()
        ))
        .bind(item.id())
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, BorrowingRow>(
            r#"
            INSERT INTO borrowings (borrower_id, librarian_id, book_id, research_id, borrow_date, due_date, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(borrowing.borrower_id)
        .bind(borrowing.librarian_id)
        .bind(item.book_id())
        .bind(item.research_id())
        .bind(borrowing.borrow_date)
        .bind(borrowing.due_date)
        .bind(BorrowingStatus::Borrowed)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Borrowing::try_from(row)
    }

    async fn mark_returned(&self, borrowing_id: i32, record: ReturnRecord) -> AppResult<Borrowing> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, BorrowingRow>(
            "SELECT * FROM borrowings WHERE id = $1 FOR UPDATE",
        )
        .bind(borrowing_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Borrowing with id {} not found", borrowing_id)))?;
        let current = Borrowing::try_from(current)?;

        if current.return_date.is_some() {
            return Err(AppError::NotFound(format!(
                "Borrowing with id {} has already been returned",
                borrowing_id
            )));
        }

        let row = sqlx::query_as::<_, BorrowingRow>(
            r#"
            UPDATE borrowings
            SET return_date = $2, status = $3, rating = $4, review = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(borrowing_id)
        .bind(record.returned_at)
        .bind(BorrowingStatus::Returned)
        .bind(record.rating)
        .bind(&record.review)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(&format!(
            "UPDATE {} SET available_copies = available_copies + 1 WHERE id = $1",
            current.item.table()
        ))
        .bind(current.item.id())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Borrowing::try_from(row)
    }

    async fn get_by_id(&self, borrowing_id: i32) -> AppResult<Borrowing> {
        let row = sqlx::query_as::<_, BorrowingRow>("SELECT * FROM borrowings WHERE id = $1")
            .bind(borrowing_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrowing with id {} not found", borrowing_id)))?;

        Borrowing::try_from(row)
    }

    async fn search(
        &self,
        query: &BorrowingQuery,
        today: NaiveDate,
    ) -> AppResult<(Vec<Borrowing>, i64)> {
        let total = filtered("SELECT COUNT(*) FROM borrowings", query, today)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut select = filtered("SELECT * FROM borrowings", query, today);
        select
            .push(" ORDER BY borrow_date DESC, id DESC LIMIT ")
            .push_bind(query.per_page())
            .push(" OFFSET ")
            .push_bind(query.offset());

        let borrowings = select
            .build_query_as::<BorrowingRow>()
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Borrowing::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok((borrowings, total))
    }
}
