//! API handlers for Bibliotheca REST endpoints

pub mod borrowings;
pub mod catalog;
pub mod health;
pub mod members;
pub mod openapi;

use axum::{
    routing::{get, post, put},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::AppState;

/// Paginated response wrapper
#[derive(Serialize, ToSchema)]
pub struct PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Page content
    pub items: Vec<T>,
    /// Total number of matching records
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Items per page
    pub per_page: i64,
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Borrowings
        .route(
            "/borrowings",
            get(borrowings::list_borrowings).post(borrowings::create_borrowing),
        )
        .route("/borrowings/:id", get(borrowings::get_borrowing))
        .route("/borrowings/:id/return", post(borrowings::return_borrowing))
        // Catalog
        .route("/books", get(catalog::list_books).post(catalog::create_book))
        .route("/books/:id", get(catalog::get_book))
        .route(
            "/research-papers",
            get(catalog::list_research_papers).post(catalog::create_research_paper),
        )
        .route("/research-papers/:id", get(catalog::get_research_paper))
        // Members
        .route("/borrowers", get(members::list_borrowers).post(members::create_borrower))
        .route("/borrowers/:id", get(members::get_borrower))
        .route("/borrowers/:id/membership", put(members::update_membership))
        .route("/borrowers/:id/borrowings", get(borrowings::get_borrower_borrowings))
        .route("/librarians", get(members::list_librarians).post(members::create_librarian))
        .route("/librarians/:id", get(members::get_librarian))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
