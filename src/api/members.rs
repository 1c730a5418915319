//! Borrower and librarian endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        member::{
            Borrower, CreateBorrower, CreateLibrarian, Librarian, MemberQuery, UpdateMembership,
        },
        paging,
    },
};

use super::PaginatedResponse;

/// List borrowers
#[utoipa::path(
    get,
    path = "/borrowers",
    tag = "members",
    params(MemberQuery),
    responses(
        (status = 200, description = "List of borrowers", body = PaginatedResponse<Borrower>)
    )
)]
pub async fn list_borrowers(
    State(state): State<crate::AppState>,
    Query(query): Query<MemberQuery>,
) -> AppResult<Json<PaginatedResponse<Borrower>>> {
    let (borrowers, total) = state.services.members.search_borrowers(&query).await?;
    let (page, per_page, _) = paging(query.page, query.per_page);

    Ok(Json(PaginatedResponse {
        items: borrowers,
        total,
        page,
        per_page,
    }))
}

/// Get borrower by ID
#[utoipa::path(
    get,
    path = "/borrowers/{id}",
    tag = "members",
    params(
        ("id" = i32, Path, description = "Borrower ID")
    ),
    responses(
        (status = 200, description = "Borrower details", body = Borrower),
        (status = 404, description = "Borrower not found")
    )
)]
pub async fn get_borrower(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Borrower>> {
    let borrower = state.services.members.get_borrower(id).await?;
    Ok(Json(borrower))
}

/// Register a borrower
#[utoipa::path(
    post,
    path = "/borrowers",
    tag = "members",
    request_body = CreateBorrower,
    responses(
        (status = 201, description = "Borrower created", body = Borrower),
        (status = 400, description = "Invalid borrower data")
    )
)]
pub async fn create_borrower(
    State(state): State<crate::AppState>,
    Json(borrower): Json<CreateBorrower>,
) -> AppResult<(StatusCode, Json<Borrower>)> {
    let created = state.services.members.create_borrower(borrower).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a borrower's membership status and expiry
#[utoipa::path(
    put,
    path = "/borrowers/{id}/membership",
    tag = "members",
    params(
        ("id" = i32, Path, description = "Borrower ID")
    ),
    request_body = UpdateMembership,
    responses(
        (status = 200, description = "Membership updated", body = Borrower),
        (status = 404, description = "Borrower not found")
    )
)]
pub async fn update_membership(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(update): Json<UpdateMembership>,
) -> AppResult<Json<Borrower>> {
    let updated = state.services.members.update_membership(id, update).await?;
    Ok(Json(updated))
}

/// List librarians
#[utoipa::path(
    get,
    path = "/librarians",
    tag = "members",
    params(MemberQuery),
    responses(
        (status = 200, description = "List of librarians", body = PaginatedResponse<Librarian>)
    )
)]
pub async fn list_librarians(
    State(state): State<crate::AppState>,
    Query(query): Query<MemberQuery>,
) -> AppResult<Json<PaginatedResponse<Librarian>>> {
    let (librarians, total) = state.services.members.search_librarians(&query).await?;
    let (page, per_page, _) = paging(query.page, query.per_page);

    Ok(Json(PaginatedResponse {
        items: librarians,
        total,
        page,
        per_page,
    }))
}

/// Get librarian by ID
#[utoipa::path(
    get,
    path = "/librarians/{id}",
    tag = "members",
    params(
        ("id" = i32, Path, description = "Librarian ID")
    ),
    responses(
        (status = 200, description = "Librarian details", body = Librarian),
        (status = 404, description = "Librarian not found")
    )
)]
pub async fn get_librarian(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Librarian>> {
    let librarian = state.services.members.get_librarian(id).await?;
    Ok(Json(librarian))
}

/// Register a librarian
#[utoipa::path(
    post,
    path = "/librarians",
    tag = "members",
    request_body = CreateLibrarian,
    responses(
        (status = 201, description = "Librarian created", body = Librarian),
        (status = 400, description = "Invalid librarian data")
    )
)]
pub async fn create_librarian(
    State(state): State<crate::AppState>,
    Json(librarian): Json<CreateLibrarian>,
) -> AppResult<(StatusCode, Json<Librarian>)> {
    let created = state.services.members.create_librarian(librarian).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
