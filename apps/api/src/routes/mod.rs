//! Route registration.

pub mod receipts;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::ApiError;
use crate::AppState;

/// Assembles the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/receipts", receipts::router())
        .with_state(state)
}

/// Liveness probe backed by a `SELECT 1` against the database.
async fn health(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    if state.db.health_check().await {
        Ok(Json(serde_json::json!({ "status": "ok" })))
    } else {
        Err(ApiError::internal())
    }
}
