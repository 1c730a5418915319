//! Bibliotheca Library Borrowing Server
//!
//! A REST JSON API for a small library: book and research-paper catalogs,
//! borrower and librarian records, and the borrowing/return workflow with
//! due dates, derived overdue status, fines and ratings.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
