//! Response DTOs.
//!
//! Money amounts are serialized as strings with exactly 2 decimal
//! places and quantities with 3, matching the stored precision, so
//! `"1375.00"` stays `"1375.00"` no matter which client parses it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use folio_core::money::{round_money, round_quantity};
use folio_core::{LineItem, Receipt, ReceiptKind, ReceiptStatus};

/// Formats a money amount to 2 decimal places.
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

/// Formats a quantity to 3 decimal places.
pub fn format_quantity(value: Decimal) -> String {
    format!("{:.3}", round_quantity(value))
}

/// One receipt, as returned by every read path.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptDto {
    pub id: String,
    pub kind: ReceiptKind,
    pub series: String,
    pub number: i64,
    pub issued_at: DateTime<Utc>,
    pub issuer_tax_id: String,
    pub issuer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_tax_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_name: Option<String>,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    pub status: ReceiptStatus,
    pub items: Vec<LineItemDto>,
}

/// One line item of a receipt.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemDto {
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    pub subtotal: String,
}

impl From<&LineItem> for LineItemDto {
    fn from(item: &LineItem) -> Self {
        LineItemDto {
            description: item.description().to_string(),
            quantity: format_quantity(item.quantity()),
            unit_price: format_money(item.unit_price()),
            subtotal: format_money(item.subtotal()),
        }
    }
}

impl From<&Receipt> for ReceiptDto {
    fn from(receipt: &Receipt) -> Self {
        ReceiptDto {
            id: receipt.id().to_string(),
            kind: receipt.kind(),
            series: receipt.series().to_string(),
            number: receipt.number(),
            issued_at: receipt.issued_at(),
            issuer_tax_id: receipt.issuer_tax_id().to_string(),
            issuer_name: receipt.issuer_name().to_string(),
            recipient_tax_id: receipt.recipient_tax_id().map(str::to_string),
            recipient_name: receipt.recipient_name().map(str::to_string),
            subtotal: format_money(receipt.subtotal()),
            tax: format_money(receipt.tax()),
            total: format_money(receipt.total()),
            status: receipt.status(),
            items: receipt.items().iter().map(LineItemDto::from).collect(),
        }
    }
}

/// Confirmation body for a successful void.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoidReceiptResponse {
    pub message: String,
    pub receipt_id: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
