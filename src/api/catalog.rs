//! Catalog endpoints: books and research papers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        catalog::{Book, CatalogQuery, CreateBook, CreateResearchPaper, ResearchPaper},
        paging,
    },
};

use super::PaginatedResponse;

/// List books with search and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "catalog",
    params(CatalogQuery),
    responses(
        (status = 200, description = "List of books", body = PaginatedResponse<Book>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<PaginatedResponse<Book>>> {
    let (books, total) = state.services.catalog.search_books(&query).await?;
    let (page, per_page, _) = paging(query.page, query.per_page);

    Ok(Json(PaginatedResponse {
        items: books,
        total,
        page,
        per_page,
    }))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "catalog",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/books",
    tag = "catalog",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid book data")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(book): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.catalog.create_book(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List research papers with search and pagination
#[utoipa::path(
    get,
    path = "/research-papers",
    tag = "catalog",
    params(CatalogQuery),
    responses(
        (status = 200, description = "List of research papers", body = PaginatedResponse<ResearchPaper>)
    )
)]
pub async fn list_research_papers(
    State(state): State<crate::AppState>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<PaginatedResponse<ResearchPaper>>> {
    let (papers, total) = state.services.catalog.search_research_papers(&query).await?;
    let (page, per_page, _) = paging(query.page, query.per_page);

    Ok(Json(PaginatedResponse {
        items: papers,
        total,
        page,
        per_page,
    }))
}

/// Get research paper by ID
#[utoipa::path(
    get,
    path = "/research-papers/{id}",
    tag = "catalog",
    params(
        ("id" = i32, Path, description = "Research paper ID")
    ),
    responses(
        (status = 200, description = "Research paper details", body = ResearchPaper),
        (status = 404, description = "Research paper not found")
    )
)]
pub async fn get_research_paper(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ResearchPaper>> {
    let paper = state.services.catalog.get_research_paper(id).await?;
    Ok(Json(paper))
}

/// Add a research paper to the catalog
#[utoipa::path(
    post,
    path = "/research-papers",
    tag = "catalog",
    request_body = CreateResearchPaper,
    responses(
        (status = 201, description = "Research paper created", body = ResearchPaper),
        (status = 400, description = "Invalid research paper data")
    )
)]
pub async fn create_research_paper(
    State(state): State<crate::AppState>,
    Json(paper): Json<CreateResearchPaper>,
) -> AppResult<(StatusCode, Json<ResearchPaper>)> {
    let created = state.services.catalog.create_research_paper(paper).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
