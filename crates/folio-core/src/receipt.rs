//! # Receipt Aggregate
//!
//! The receipt entity and its owned line items.
//!
//! ## Two Construction Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    How a Receipt Comes to Exist                     │
//! │                                                                     │
//! │  1. ISSUE (business path)                                           │
//! │     validated input + allocated number                              │
//! │          │                                                          │
//! │          ▼                                                          │
//! │     Receipt::issue() ──► new id, issued_at = now (UTC),             │
//! │                          totals computed, status = Issued           │
//! │                                                                     │
//! │  2. REHYDRATE (trusted path)                                        │
//! │     storage rows (already valid)                                    │
//! │          │                                                          │
//! │          ▼                                                          │
//! │     Receipt::from_record() ──► fields restored verbatim,            │
//! │                                NO business rules re-run             │
//! │                                                                     │
//! │  After construction the only mutation is void().                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fields are private; callers read through accessors and mutate only
//! through the transition methods. There are no setters.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::{line_subtotal, Totals};
use crate::types::{ReceiptKind, ReceiptStatus};
use crate::validation::ValidatedReceipt;

// =============================================================================
// Line Item
// =============================================================================

/// One line of a receipt.
///
/// An immutable computed value object: the subtotal is derived once at
/// construction and never changes. Line items exist only inside a
/// receipt and are created together with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    description: String,
    quantity: Decimal,
    unit_price: Decimal,
    subtotal: Decimal,
}

impl LineItem {
    /// Creates a line item, computing its subtotal.
    ///
    /// Input is expected to have passed the validation gate
    /// (non-empty description, positive quantity and price).
    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        let subtotal = line_subtotal(quantity, unit_price);
        LineItem {
            description: description.into(),
            quantity,
            unit_price,
            subtotal,
        }
    }

    /// Restores a line item from storage without recomputing anything.
    pub fn from_record(record: LineItemRecord) -> Self {
        LineItem {
            description: record.description,
            quantity: record.quantity,
            unit_price: record.unit_price,
            subtotal: record.subtotal,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }
}

/// Raw line-item fields as loaded from storage.
#[derive(Debug, Clone)]
pub struct LineItemRecord {
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

// =============================================================================
// Receipt
// =============================================================================

/// A sales receipt: the aggregate root owning its line items.
///
/// Everything except `status` is immutable after construction; `status`
/// changes only through [`Receipt::void`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    id: String,
    kind: ReceiptKind,
    series: String,
    number: i64,
    issued_at: DateTime<Utc>,
    issuer_tax_id: String,
    issuer_name: String,
    recipient_tax_id: Option<String>,
    recipient_name: Option<String>,
    items: Vec<LineItem>,
    subtotal: Decimal,
    tax: Decimal,
    total: Decimal,
    status: ReceiptStatus,
}

impl Receipt {
    /// Issues a new receipt from validated input and an allocated number.
    ///
    /// Assigns a fresh id, stamps `issued_at` with the current UTC time,
    /// computes aggregate totals from the items in input order, and
    /// starts the lifecycle at `Issued`.
    pub fn issue(input: ValidatedReceipt, number: i64) -> Self {
        let ValidatedReceipt {
            kind,
            series,
            issuer_tax_id,
            issuer_name,
            recipient_tax_id,
            recipient_name,
            items,
        } = input;

        let totals = Totals::from_line_subtotals(items.iter().map(LineItem::subtotal));

        Receipt {
            id: Uuid::new_v4().to_string(),
            kind,
            series,
            number,
            issued_at: Utc::now(),
            issuer_tax_id,
            issuer_name,
            recipient_tax_id,
            recipient_name,
            items,
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            status: ReceiptStatus::Issued,
        }
    }

    /// Restores a receipt from storage rows.
    ///
    /// Trusted loader: the record was valid when persisted, so no
    /// business rules are re-run and no totals are recomputed (a voided
    /// receipt keeps the amounts it was issued with).
    pub fn from_record(record: ReceiptRecord) -> Self {
        let ReceiptRecord {
            id,
            kind,
            series,
            number,
            issued_at,
            issuer_tax_id,
            issuer_name,
            recipient_tax_id,
            recipient_name,
            subtotal,
            tax,
            total,
            status,
            items,
        } = record;

        Receipt {
            id,
            kind,
            series,
            number,
            issued_at,
            issuer_tax_id,
            issuer_name,
            recipient_tax_id,
            recipient_name,
            items: items.into_iter().map(LineItem::from_record).collect(),
            subtotal,
            tax,
            total,
            status,
        }
    }

    /// Voids this receipt.
    ///
    /// Allowed only while the receipt is `Issued`; voiding an already
    /// voided receipt is a conflict and leaves the state untouched.
    /// There is no transition back.
    pub fn void(&mut self) -> CoreResult<()> {
        if self.status == ReceiptStatus::Voided {
            return Err(CoreError::AlreadyVoided {
                id: self.id.clone(),
            });
        }

        self.status = ReceiptStatus::Voided;
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ReceiptKind {
        self.kind
    }

    pub fn series(&self) -> &str {
        &self.series
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn issuer_tax_id(&self) -> &str {
        &self.issuer_tax_id
    }

    pub fn issuer_name(&self) -> &str {
        &self.issuer_name
    }

    pub fn recipient_tax_id(&self) -> Option<&str> {
        self.recipient_tax_id.as_deref()
    }

    pub fn recipient_name(&self) -> Option<&str> {
        self.recipient_name.as_deref()
    }

    /// Line items in their original input order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    pub fn tax(&self) -> Decimal {
        self.tax
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn status(&self) -> ReceiptStatus {
        self.status
    }
}

/// Raw receipt fields as loaded from storage, consumed by
/// [`Receipt::from_record`].
#[derive(Debug, Clone)]
pub struct ReceiptRecord {
    pub id: String,
    pub kind: ReceiptKind,
    pub series: String,
    pub number: i64,
    pub issued_at: DateTime<Utc>,
    pub issuer_tax_id: String,
    pub issuer_name: String,
    pub recipient_tax_id: Option<String>,
    pub recipient_name: Option<String>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub status: ReceiptStatus,
    pub items: Vec<LineItemRecord>,
}

// =============================================================================
// Unit Tests
// =============================================================================
