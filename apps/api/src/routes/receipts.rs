//! # Receipt Routes
//!
//! The four operations over the receipt core: list, get-by-id, create,
//! void. Handlers validate, call into the repository, and translate
//! results; no business rule lives here.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use tracing::{info, warn};

use folio_core::validation::{self, ListReceiptsInput, NewReceiptInput};
use folio_core::PagedResult;

use crate::dto::{ReceiptDto, VoidReceiptResponse};
use crate::error::ApiError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_receipts).post(create_receipt))
        .route("/:id", get(get_receipt))
        .route("/:id/void", put(void_receipt))
}

/// GET /receipts - paginated, filtered listing.
async fn list_receipts(
    State(state): State<AppState>,
    Query(input): Query<ListReceiptsInput>,
) -> Result<Json<PagedResult<ReceiptDto>>, ApiError> {
    let (page, filter) = validation::validate_list_query(&input)?;

    info!(
        page = page.page,
        page_size = page.page_size,
        kind = filter.kind.map(|k| k.as_str()),
        status = filter.status.map(|s| s.as_str()),
        "Listing receipts"
    );

    let (receipts, total_count) = state.db.receipts().list(&filter, page).await?;

    info!(
        total_count,
        returned = receipts.len(),
        page = page.page,
        "Receipts listed"
    );

    let items = receipts.iter().map(ReceiptDto::from).collect();
    Ok(Json(PagedResult::new(items, total_count, page)))
}

/// GET /receipts/{id} - one receipt with its items.
async fn get_receipt(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReceiptDto>, ApiError> {
    info!(id = %id, "Fetching receipt");

    let receipt = state
        .db
        .receipts()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| {
            warn!(id = %id, "Receipt not found");
            ApiError::not_found("Receipt", &id)
        })?;

    Ok(Json(ReceiptDto::from(&receipt)))
}

/// POST /receipts - validate, allocate a number, persist.
async fn create_receipt(
    State(state): State<AppState>,
    Json(input): Json<NewReceiptInput>,
) -> Result<(StatusCode, Json<ReceiptDto>), ApiError> {
    info!(
        kind = %input.kind,
        series = %input.series,
        issuer_tax_id = %input.issuer_tax_id,
        items = input.items.len(),
        "Creating receipt"
    );

    // Fail-closed: nothing is persisted until every rule passes.
    let validated = validation::validate_new_receipt(&input).map_err(|errors| {
        warn!(
            series = %input.series,
            violations = errors.len(),
            "Receipt creation rejected by validation"
        );
        errors
    })?;

    let receipt = state.db.receipts().create(validated).await.map_err(|e| {
        tracing::error!(series = %input.series, error = %e, "Receipt creation failed");
        e
    })?;

    info!(
        id = %receipt.id(),
        series = %receipt.series(),
        number = receipt.number(),
        total = %receipt.total(),
        "Receipt created"
    );

    Ok((StatusCode::CREATED, Json(ReceiptDto::from(&receipt))))
}

/// PUT /receipts/{id}/void - transition to Voided.
async fn void_receipt(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VoidReceiptResponse>, ApiError> {
    info!(id = %id, "Voiding receipt");

    let repo = state.db.receipts();

    let mut receipt = repo.get_by_id(&id).await?.ok_or_else(|| {
        warn!(id = %id, "Receipt not found for void");
        ApiError::not_found("Receipt", &id)
    })?;

    // The entity decides whether the transition is legal.
    receipt.void().map_err(|e| {
        warn!(id = %id, "Attempt to void an already voided receipt");
        e
    })?;

    repo.update(&receipt).await?;

    info!(
        id = %id,
        series = %receipt.series(),
        number = receipt.number(),
        "Receipt voided"
    );

    Ok(Json(VoidReceiptResponse {
        message: "Receipt voided successfully".to_string(),
        receipt_id: id,
    }))
}
