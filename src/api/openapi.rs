//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{borrowings, catalog, health, members};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bibliotheca API",
        version = "0.1.0",
        description = "Library borrowing REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Borrowings
        borrowings::list_borrowings,
        borrowings::get_borrowing,
        borrowings::create_borrowing,
        borrowings::return_borrowing,
        borrowings::get_borrower_borrowings,
        // Catalog
        catalog::list_books,
        catalog::get_book,
        catalog::create_book,
        catalog::list_research_papers,
        catalog::get_research_paper,
        catalog::create_research_paper,
        // Members
        members::list_borrowers,
        members::get_borrower,
        members::create_borrower,
        members::update_membership,
        members::list_librarians,
        members::get_librarian,
        members::create_librarian,
    ),
    components(
        schemas(
            // Borrowings
            crate::models::borrowing::BorrowingStatus,
            crate::models::borrowing::BorrowingDetails,
            crate::models::borrowing::CreateBorrowing,
            crate::models::borrowing::ReturnBorrowing,
            crate::models::borrowing::BorrowingQuery,
            // Catalog
            crate::models::catalog::Book,
            crate::models::catalog::ResearchPaper,
            crate::models::catalog::CreateBook,
            crate::models::catalog::CreateResearchPaper,
            crate::models::catalog::CatalogQuery,
            // Members
            crate::models::member::MembershipStatus,
            crate::models::member::Borrower,
            crate::models::member::Librarian,
            crate::models::member::CreateBorrower,
            crate::models::member::UpdateMembership,
            crate::models::member::CreateLibrarian,
            crate::models::member::MemberQuery,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "borrowings", description = "Borrowing and return workflow"),
        (name = "catalog", description = "Books and research papers"),
        (name = "members", description = "Borrowers and librarians")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
