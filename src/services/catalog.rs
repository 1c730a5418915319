//! Catalog management service

use validator::Validate;

use crate::{
    error::AppResult,
    models::catalog::{Book, CatalogQuery, CreateBook, CreateResearchPaper, ResearchPaper},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search books with filters
    pub async fn search_books(&self, query: &CatalogQuery) -> AppResult<(Vec<Book>, i64)> {
        self.repository.catalog.search_books(query).await
    }

    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.catalog.get_book(id).await
    }

    /// Add a book to the catalog
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()?;
        let created = self.repository.catalog.create_book(&book).await?;
        tracing::info!(book_id = created.id, copies = created.total_copies, "Book added to catalog");
        Ok(created)
    }

    /// Search research papers with filters
    pub async fn search_research_papers(
        &self,
        query: &CatalogQuery,
    ) -> AppResult<(Vec<ResearchPaper>, i64)> {
        self.repository.catalog.search_research_papers(query).await
    }

    pub async fn get_research_paper(&self, id: i32) -> AppResult<ResearchPaper> {
        self.repository.catalog.get_research_paper(id).await
    }

    /// Add a research paper to the catalog
    pub async fn create_research_paper(&self, paper: CreateResearchPaper) -> AppResult<ResearchPaper> {
        paper.validate()?;
        let created = self.repository.catalog.create_research_paper(&paper).await?;
        tracing::info!(
            research_id = created.id,
            copies = created.total_copies,
            "Research paper added to catalog"
        );
        Ok(created)
    }
}
