//! Router tests that never reach the database.
//!
//! The pool connects lazily, so requests rejected before any query runs can be
//! exercised without PostgreSQL.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use bibliotheca::{
    api,
    config::{AppConfig, DatabaseConfig, LoanPolicy, LoggingConfig, ServerConfig},
    repository::Repository,
    services::Services,
    AppState,
};

fn app() -> Router {
    let config = AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig::default(),
        logging: LoggingConfig::default(),
        loans: LoanPolicy::default(),
    };

    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database.url)
        .expect("Invalid database URL");

    let services = Services::new(Repository::new(pool), config.loans.clone());

    api::router(AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    })
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.expect("Request failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

#[tokio::test]
async fn test_health_check() {
    let request = Request::builder()
        .uri("/api/v1/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_create_with_both_items_is_rejected() {
    let (status, body) = send(post_json(
        "/api/v1/borrowings",
        json!({
            "borrower_id": 1,
            "librarian_id": 1,
            "book_id": 42,
            "research_id": 7
        }),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_create_without_item_is_rejected() {
    let (status, _) = send(post_json(
        "/api/v1/borrowings",
        json!({ "borrower_id": 1, "librarian_id": 1 }),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_return_with_rating_out_of_range() {
    for rating in [11, 40_000] {
        let (status, body) = send(post_json(
            "/api/v1/borrowings/1/return",
            json!({ "rating": rating }),
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "BadValue");
        assert!(body["message"].as_str().unwrap_or_default().contains("Rating"));
    }
}

#[tokio::test]
async fn test_create_with_borrow_date_at_calendar_end() {
    let (status, body) = send(post_json(
        "/api/v1/borrowings",
        json!({
            "borrower_id": 1,
            "librarian_id": 1,
            "book_id": 42,
            "borrow_date": "+262142-12-30"
        }),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_openapi_document_lists_borrowings() {
    let request = Request::builder()
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/borrowings/{id}/return"].is_object());

    let schemas = &body["components"]["schemas"];
    assert!(schemas["BorrowingDetails"]["properties"]["fine"].is_object());
    assert!(schemas["FineAssessment"].is_null());
}
