//! # Validation Module
//!
//! Pre-construction validation for folio.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Transport (axum)                                          │
//! │  ├── Type validation (deserialization)                              │
//! │  └── Missing fields default to empty and fall through               │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE - business rule validation                    │
//! │  ├── ALL violations collected into one field → messages map         │
//! │  └── Nothing is persisted until the gate passes (fail-closed)       │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  ├── CHECK constraints on kind/status/number                        │
//! │  └── UNIQUE (series, number)                                        │
//! │                                                                     │
//! │  Defense in depth: each layer catches different errors.             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field keys in [`ValidationErrors`] use the wire spelling
//! (`issuerTaxId`, `items[0].description`, ...) so callers can map
//! violations straight back onto their request body.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ValidationErrors;
use crate::query::{end_of_day_utc, start_of_day_utc, PageRequest, ReceiptFilter};
use crate::receipt::LineItem;
use crate::types::{ReceiptKind, ReceiptStatus};
use crate::{MAX_NAME_LEN, MAX_PAGE_SIZE, SERIES_LEN, TAX_ID_LEN};

// =============================================================================
// Creation Input
// =============================================================================

/// Raw creation input, exactly as received from the caller.
///
/// Missing fields deserialize to empty values so the gate can report
/// every violation at once instead of failing at the transport layer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReceiptInput {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub series: String,
    #[serde(default)]
    pub issuer_tax_id: String,
    #[serde(default)]
    pub issuer_name: String,
    #[serde(default)]
    pub recipient_tax_id: Option<String>,
    #[serde(default)]
    pub recipient_name: Option<String>,
    #[serde(default)]
    pub items: Vec<NewLineItemInput>,
}

/// Raw line-item creation input.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLineItemInput {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quantity: Decimal,
    #[serde(default)]
    pub unit_price: Decimal,
}

/// Creation input that passed the gate, ready for entity construction.
#[derive(Debug, Clone)]
pub struct ValidatedReceipt {
    pub kind: ReceiptKind,
    pub series: String,
    pub issuer_tax_id: String,
    pub issuer_name: String,
    pub recipient_tax_id: Option<String>,
    pub recipient_name: Option<String>,
    pub items: Vec<LineItem>,
}

// =============================================================================
// Field Validators
// =============================================================================

/// Checks the 11-digit tax identifier format.
///
/// Returns the violation message, or None when the value is valid.
fn tax_id_violation(value: &str) -> Option<String> {
    if value.chars().count() != TAX_ID_LEN {
        return Some(format!("must contain exactly {} digits", TAX_ID_LEN));
    }
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Some("must contain only decimal digits".to_string());
    }
    None
}

/// Checks the 4-character series format for a known kind.
fn series_violation(kind: ReceiptKind, series: &str) -> Option<String> {
    let prefix = kind.series_prefix();
    let mut chars = series.chars();
    let valid = chars.next() == Some(prefix)
        && series.chars().count() == SERIES_LEN
        && chars.all(|c| c.is_ascii_digit());

    if valid {
        None
    } else {
        Some(format!(
            "must be '{prefix}' followed by 3 digits (e.g. {prefix}001)"
        ))
    }
}

/// Treats empty / whitespace-only optional strings as absent.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// =============================================================================
// Creation Gate
// =============================================================================

/// Validates raw creation input against every business rule.
///
/// Collect-all: the returned [`ValidationErrors`] carries every
/// violation, not just the first. On success the input is converted
/// into a [`ValidatedReceipt`] with its line items constructed.
pub fn validate_new_receipt(input: &NewReceiptInput) -> Result<ValidatedReceipt, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    // Kind gates the series prefix and the recipient rules below.
    let kind = if input.kind.trim().is_empty() {
        errors.push("kind", "is required");
        None
    } else {
        match input.kind.parse::<ReceiptKind>() {
            Ok(kind) => Some(kind),
            Err(_) => {
                errors.push("kind", "must be 'invoice' or 'simplified_receipt'");
                None
            }
        }
    };

    if input.series.is_empty() {
        errors.push("series", "is required");
    } else if input.series.chars().count() != SERIES_LEN {
        errors.push(
            "series",
            format!("must be exactly {} characters", SERIES_LEN),
        );
    } else if let Some(kind) = kind {
        if let Some(message) = series_violation(kind, &input.series) {
            errors.push("series", message);
        }
    }

    if input.issuer_tax_id.is_empty() {
        errors.push("issuerTaxId", "is required");
    } else if let Some(message) = tax_id_violation(&input.issuer_tax_id) {
        errors.push("issuerTaxId", message);
    }

    if input.issuer_name.trim().is_empty() {
        errors.push("issuerName", "is required");
    } else if input.issuer_name.chars().count() > MAX_NAME_LEN {
        errors.push(
            "issuerName",
            format!("must be at most {} characters", MAX_NAME_LEN),
        );
    }

    // Recipient identity is mandatory for invoices; a simplified
    // receipt may omit it entirely (walk-in customer), but a supplied
    // tax id must still be well-formed.
    let recipient_tax_id = non_blank(&input.recipient_tax_id);
    let recipient_name = non_blank(&input.recipient_name);

    match kind {
        Some(ReceiptKind::Invoice) => {
            match recipient_tax_id {
                None => errors.push("recipientTaxId", "is required for an invoice"),
                Some(value) => {
                    if let Some(message) = tax_id_violation(value) {
                        errors.push("recipientTaxId", message);
                    }
                }
            }
            match recipient_name {
                None => errors.push("recipientName", "is required for an invoice"),
                Some(value) => {
                    if value.chars().count() > MAX_NAME_LEN {
                        errors.push(
                            "recipientName",
                            format!("must be at most {} characters", MAX_NAME_LEN),
                        );
                    }
                }
            }
        }
        Some(ReceiptKind::SimplifiedReceipt) | None => {
            if let Some(value) = recipient_tax_id {
                if let Some(message) = tax_id_violation(value) {
                    errors.push("recipientTaxId", message);
                }
            }
        }
    }

    if input.items.is_empty() {
        errors.push("items", "must contain at least one item");
    }
    for (index, item) in input.items.iter().enumerate() {
        if item.description.trim().is_empty() {
            errors.push(format!("items[{index}].description"), "is required");
        } else if item.description.chars().count() > MAX_NAME_LEN {
            errors.push(
                format!("items[{index}].description"),
                format!("must be at most {} characters", MAX_NAME_LEN),
            );
        }
        if item.quantity <= Decimal::ZERO {
            errors.push(format!("items[{index}].quantity"), "must be greater than 0");
        }
        if item.unit_price <= Decimal::ZERO {
            errors.push(
                format!("items[{index}].unitPrice"),
                "must be greater than 0",
            );
        }
    }

    // The gate passed only when kind parsed and nothing else fired.
    let Some(kind) = kind else {
        return Err(errors);
    };
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidatedReceipt {
        kind,
        series: input.series.clone(),
        issuer_tax_id: input.issuer_tax_id.clone(),
        issuer_name: input.issuer_name.clone(),
        recipient_tax_id: recipient_tax_id.map(str::to_string),
        recipient_name: recipient_name.map(str::to_string),
        items: input
            .items
            .iter()
            .map(|item| LineItem::new(item.description.clone(), item.quantity, item.unit_price))
            .collect(),
    })
}

// =============================================================================
// List Query Input
// =============================================================================

/// Raw list parameters, as received from the caller.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReceiptsInput {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub kind: Option<String>,
    pub recipient_tax_id: Option<String>,
    pub status: Option<String>,
}

/// Default page size when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// =============================================================================
// List Query Gate
// =============================================================================

/// Validates list parameters and translates them into the repository
/// filter contract.
///
/// Dates are calendar days; `dateFrom` becomes UTC start of day and
/// `dateTo` extends to the end of its day (23:59:59.999) so the whole
/// day is included.
pub fn validate_list_query(
    input: &ListReceiptsInput,
) -> Result<(PageRequest, ReceiptFilter), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let page = input.page.unwrap_or(1);
    if page == 0 {
        errors.push("page", "must be greater than 0");
    }

    let page_size = input.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    if page_size == 0 {
        errors.push("pageSize", "must be greater than 0");
    } else if page_size > MAX_PAGE_SIZE {
        errors.push(
            "pageSize",
            format!("must be at most {}", MAX_PAGE_SIZE),
        );
    }

    if let (Some(from), Some(to)) = (input.date_from, input.date_to) {
        if from > to {
            errors.push("dateFrom", "must be on or before dateTo");
        }
    }

    let kind = match non_blank(&input.kind) {
        None => None,
        Some(value) => match value.parse::<ReceiptKind>() {
            Ok(kind) => Some(kind),
            Err(_) => {
                errors.push("kind", "must be 'invoice' or 'simplified_receipt'");
                None
            }
        },
    };

    let status = match non_blank(&input.status) {
        None => None,
        Some(value) => match value.parse::<ReceiptStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                errors.push("status", "must be 'issued' or 'voided'");
                None
            }
        },
    };

    let recipient_tax_id = non_blank(&input.recipient_tax_id);
    if let Some(value) = recipient_tax_id {
        if let Some(message) = tax_id_violation(value) {
            errors.push("recipientTaxId", message);
        }
    }

    let page_request = PageRequest { page, page_size };
    let filter = ReceiptFilter {
        date_from: input.date_from.map(start_of_day_utc),
        date_to: input.date_to.map(end_of_day_utc),
        kind,
        recipient_tax_id: recipient_tax_id.map(str::to_string),
        status,
    };

    errors.into_result((page_request, filter))
}

// =============================================================================
// Unit Tests
// =============================================================================
