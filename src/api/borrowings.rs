//! Borrowing lifecycle endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::borrowing::{BorrowingDetails, BorrowingQuery, CreateBorrowing, ReturnBorrowing},
};

use super::PaginatedResponse;

/// List borrowings with filters and pagination
#[utoipa::path(
    get,
    path = "/borrowings",
    tag = "borrowings",
    params(BorrowingQuery),
    responses(
        (status = 200, description = "Matching borrowings", body = PaginatedResponse<BorrowingDetails>)
    )
)]
pub async fn list_borrowings(
    State(state): State<crate::AppState>,
    Query(query): Query<BorrowingQuery>,
) -> AppResult<Json<PaginatedResponse<BorrowingDetails>>> {
    let (borrowings, total) = state.services.borrowings.list_borrowings(&query).await?;

    Ok(Json(PaginatedResponse {
        items: borrowings,
        total,
        page: query.page(),
        per_page: query.per_page(),
    }))
}

/// Get a borrowing by ID
#[utoipa::path(
    get,
    path = "/borrowings/{id}",
    tag = "borrowings",
    params(
        ("id" = i32, Path, description = "Borrowing ID")
    ),
    responses(
        (status = 200, description = "Borrowing details", body = BorrowingDetails),
        (status = 404, description = "Borrowing not found")
    )
)]
pub async fn get_borrowing(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BorrowingDetails>> {
    let borrowing = state.services.borrowings.get_borrowing(id).await?;
    Ok(Json(borrowing))
}

/// Check out a book or research paper
#[utoipa::path(
    post,
    path = "/borrowings",
    tag = "borrowings",
    request_body = CreateBorrowing,
    responses(
        (status = 201, description = "Borrowing created", body = BorrowingDetails),
        (status = 400, description = "Both or neither item reference given"),
        (status = 404, description = "Borrower, librarian or item not found"),
        (status = 409, description = "No copies available"),
        (status = 422, description = "Borrower account frozen or expired")
    )
)]
pub async fn create_borrowing(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBorrowing>,
) -> AppResult<(StatusCode, Json<BorrowingDetails>)> {
    let borrowing = state.services.borrowings.create_borrowing(request).await?;
    Ok((StatusCode::CREATED, Json(borrowing)))
}

/// Return a borrowed item, optionally with a rating and review
#[utoipa::path(
    post,
    path = "/borrowings/{id}/return",
    tag = "borrowings",
    params(
        ("id" = i32, Path, description = "Borrowing ID")
    ),
    request_body = ReturnBorrowing,
    responses(
        (status = 200, description = "Item returned", body = BorrowingDetails),
        (status = 400, description = "Rating out of range"),
        (status = 404, description = "Borrowing not found or already returned")
    )
)]
pub async fn return_borrowing(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<ReturnBorrowing>,
) -> AppResult<Json<BorrowingDetails>> {
    let borrowing = state.services.borrowings.return_borrowing(id, request).await?;
    Ok(Json(borrowing))
}

/// Borrowings of a borrower
#[utoipa::path(
    get,
    path = "/borrowers/{id}/borrowings",
    tag = "borrowings",
    params(
        ("id" = i32, Path, description = "Borrower ID"),
        BorrowingQuery
    ),
    responses(
        (status = 200, description = "Borrower's borrowings", body = PaginatedResponse<BorrowingDetails>),
        (status = 404, description = "Borrower not found")
    )
)]
pub async fn get_borrower_borrowings(
    State(state): State<crate::AppState>,
    Path(borrower_id): Path<i32>,
    Query(query): Query<BorrowingQuery>,
) -> AppResult<Json<PaginatedResponse<BorrowingDetails>>> {
    let (page, per_page) = (query.page(), query.per_page());
    let (borrowings, total) = state
        .services
        .borrowings
        .get_borrower_borrowings(borrower_id, query)
        .await?;

    Ok(Json(PaginatedResponse {
        items: borrowings,
        total,
        page,
        per_page,
    }))
}
