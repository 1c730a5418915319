//! Catalog models: books and research papers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Book
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub total_copies: i32,
    pub available_copies: i32,
    pub created_at: DateTime<Utc>,
}

/// Research paper
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ResearchPaper {
    pub id: i32,
    pub title: String,
    pub authors: String,
    pub doi: Option<String>,
    pub total_copies: i32,
    pub available_copies: i32,
    pub created_at: DateTime<Utc>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    pub isbn: Option<String>,
    #[validate(range(min = 1, message = "At least one copy is required"))]
    pub total_copies: i32,
}

/// Create research paper request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateResearchPaper {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Authors are required"))]
    pub authors: String,
    pub doi: Option<String>,
    #[validate(range(min = 1, message = "At least one copy is required"))]
    pub total_copies: i32,
}

/// Catalog search query
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct CatalogQuery {
    /// Case-insensitive title search
    pub title: Option<String>,
    /// Only items with at least one copy on the shelf
    pub available: Option<bool>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
