//! # folio-api
//!
//! HTTP transport for folio. The router exposes the four receipt
//! operations plus a health probe:
//!
//! ```text
//! GET  /health              liveness (SELECT 1)
//! GET  /receipts            paginated, filtered listing
//! GET  /receipts/{id}       one receipt with its items
//! POST /receipts            validate → allocate → construct → persist
//! PUT  /receipts/{id}/void  lookup → transition → persist
//! ```
//!
//! Error mapping: validation failure → 400 (field → messages body),
//! not-found → 404, conflict → 400, anything else → 500 with a generic
//! message. Money amounts in bodies are formatted to 2 decimal places,
//! quantities to 3.

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;

use axum::Router;
use folio_db::Database;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

/// Builds the application router over a connected database.
pub fn build_router(db: Database) -> Router {
    routes::router(AppState { db })
}
