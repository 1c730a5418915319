//! Members repository: borrowers and librarians

use sqlx::{Pool, Postgres, QueryBuilder};

use super::contains_pattern;
use crate::{
    error::{AppError, AppResult},
    models::{
        member::{
            Borrower, CreateBorrower, CreateLibrarian, Librarian, MemberQuery, MembershipStatus,
            UpdateMembership,
        },
        paging,
    },
};

#[derive(Clone)]
pub struct MembersRepository {
    pool: Pool<Postgres>,
}

fn name_filter<'a>(select: &str, query: &MemberQuery) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new(select);
    if let Some(ref name) = query.name {
        builder
            .push(" WHERE LOWER(name) LIKE ")
            .push_bind(contains_pattern(name));
    }
    builder
}

impl MembersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get borrower by ID
    pub async fn get_borrower(&self, id: i32) -> AppResult<Borrower> {
        sqlx::query_as::<_, Borrower>("SELECT * FROM borrowers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrower with id {} not found", id)))
    }

    /// Create a borrower with an active membership
    pub async fn create_borrower(&self, borrower: &CreateBorrower) -> AppResult<Borrower> {
        let created = sqlx::query_as::<_, Borrower>(
            r#"
            INSERT INTO borrowers (name, email, membership_status, membership_expiry)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&borrower.name)
        .bind(&borrower.email)
        .bind(MembershipStatus::Active)
        .bind(borrower.membership_expiry)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update membership status and expiry
    pub async fn update_membership(&self, id: i32, update: &UpdateMembership) -> AppResult<Borrower> {
        sqlx::query_as::<_, Borrower>(
            r#"
            UPDATE borrowers SET membership_status = $2, membership_expiry = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.membership_status)
        .bind(update.membership_expiry)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Borrower with id {} not found", id)))
    }

    /// Search borrowers by name
    pub async fn search_borrowers(&self, query: &MemberQuery) -> AppResult<(Vec<Borrower>, i64)> {
        let (_, per_page, offset) = paging(query.page, query.per_page);

        let total = name_filter("SELECT COUNT(*) FROM borrowers", query)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut select = name_filter("SELECT * FROM borrowers", query);
        select
            .push(" ORDER BY name, id LIMIT ")
            .push_bind(per_page)
            .push(" OFFSET ")
            .push_bind(offset);

        let borrowers = select.build_query_as::<Borrower>().fetch_all(&self.pool).await?;

        Ok((borrowers, total))
    }

    /// Get librarian by ID
    pub async fn get_librarian(&self, id: i32) -> AppResult<Librarian> {
        sqlx::query_as::<_, Librarian>("SELECT * FROM librarians WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Librarian with id {} not found", id)))
    }

    pub async fn create_librarian(&self, librarian: &CreateLibrarian) -> AppResult<Librarian> {
        let created = sqlx::query_as::<_, Librarian>(
            "INSERT INTO librarians (name, email) VALUES ($1, $2) RETURNING *",
        )
        .bind(&librarian.name)
        .bind(&librarian.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Search librarians by name
    pub async fn search_librarians(&self, query: &MemberQuery) -> AppResult<(Vec<Librarian>, i64)> {
        let (_, per_page, offset) = paging(query.page, query.per_page);

        let total = name_filter("SELECT COUNT(*) FROM librarians", query)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut select = name_filter("SELECT * FROM librarians", query);
        select
            .push(" ORDER BY name, id LIMIT ")
            .push_bind(per_page)
            .push(" OFFSET ")
            .push_bind(offset);

        let librarians = select.build_query_as::<Librarian>().fetch_all(&self.pool).await?;

        Ok((librarians, total))
    }
}
