//! Catalog repository: books and research papers

use sqlx::{Pool, Postgres, QueryBuilder};

use super::contains_pattern;
use crate::{
    error::{AppError, AppResult},
    models::{
        catalog::{Book, CatalogQuery, CreateBook, CreateResearchPaper, ResearchPaper},
        paging,
    },
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: Pool<Postgres>,
}

fn catalog_filter<'a>(select: &str, query: &CatalogQuery) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new(select);
    builder.push(" WHERE 1 = 1");

    if let Some(ref title) = query.title {
        builder
            .push(" AND LOWER(title) LIKE ")
            .push_bind(contains_pattern(title));
    }
    if query.available == Some(true) {
        builder.push(" AND available_copies > 0");
    }

    builder
}

impl CatalogRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Create a book with every copy on the shelf
    pub async fn create_book(&self, book: &CreateBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, isbn, total_copies, available_copies)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(book.total_copies)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Search books
    pub async fn search_books(&self, query: &CatalogQuery) -> AppResult<(Vec<Book>, i64)> {
        let (_, per_page, offset) = paging(query.page, query.per_page);

        let total = catalog_filter("SELECT COUNT(*) FROM books", query)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut select = catalog_filter("SELECT * FROM books", query);
        select
            .push(" ORDER BY title, id LIMIT ")
            .push_bind(per_page)
            .push(" OFFSET ")
            .push_bind(offset);

        let books = select.build_query_as::<Book>().fetch_all(&self.pool).await?;

        Ok((books, total))
    }

    /// Get research paper by ID
    pub async fn get_research_paper(&self, id: i32) -> AppResult<ResearchPaper> {
        sqlx::query_as::<_, ResearchPaper>("SELECT * FROM research_papers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Research paper with id {} not found", id)))
    }

    /// Create a research paper with every copy on the shelf
    pub async fn create_research_paper(&self, paper: &CreateResearchPaper) -> AppResult<ResearchPaper> {
        let created = sqlx::query_as::<_, ResearchPaper>(
            r#"
            INSERT INTO research_papers (title, authors, doi, total_copies, available_copies)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING *
            "#,
        )
        .bind(&paper.title)
        .bind(&paper.authors)
        .bind(&paper.doi)
        .bind(paper.total_copies)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Search research papers
    pub async fn search_research_papers(
        &self,
        query: &CatalogQuery,
    ) -> AppResult<(Vec<ResearchPaper>, i64)> {
        let (_, per_page, offset) = paging(query.page, query.per_page);

        let total = catalog_filter("SELECT COUNT(*) FROM research_papers", query)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut select = catalog_filter("SELECT * FROM research_papers", query);
        select
            .push(" ORDER BY title, id LIMIT ")
            .push_bind(per_page)
            .push(" OFFSET ")
            .push_bind(offset);

        let papers = select
            .build_query_as::<ResearchPaper>()
            .fetch_all(&self.pool)
            .await?;

        Ok((papers, total))
    }
}
