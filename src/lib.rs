//! Bookshelf catalog server
//!
//! REST JSON API for books and their authors, backed by PostgreSQL.
//! Book writes keep `books`, `authors` and the `book_author` join table
//! consistent inside a single transaction.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}
