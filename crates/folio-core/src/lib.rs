//! # folio-core: Pure Business Logic for folio
//!
//! This crate is the **heart** of folio. It contains the receipt
//! lifecycle and numbering rules as pure functions and types with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       folio Architecture                            │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                     apps/api (axum)                         │   │
//! │  │     list, get-by-id, create, void over HTTP                 │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │               ★ folio-core (THIS CRATE) ★                   │   │
//! │  │                                                             │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌────────────┐    │   │
//! │  │   │  types   │ │  money   │ │ receipt  │ │ validation │    │   │
//! │  │   │  Kind    │ │  Totals  │ │ Receipt  │ │   rules    │    │   │
//! │  │   │  Status  │ │  18% tax │ │ LineItem │ │ collect-all│    │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └────────────┘    │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │                  folio-db (Database Layer)                  │   │
//! │  │       SQLite queries, migrations, numbering constraint      │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Closed enums (ReceiptKind, ReceiptStatus) and their
//!   text mapping for the storage boundary
//! - [`money`] - Decimal totals and tax calculation (no floating point!)
//! - [`receipt`] - Receipt aggregate and LineItem value object
//! - [`validation`] - Collect-all pre-construction validation
//! - [`query`] - Filter and pagination contract for listing
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic modulo the
//!    clock and id generator used at construction
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Decimal Money**: All monetary values are `rust_decimal::Decimal`
//!    to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod query;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationErrors};
pub use money::Totals;
pub use query::{PageRequest, PagedResult, ReceiptFilter};
pub use receipt::{LineItem, LineItemRecord, Receipt, ReceiptRecord};
pub use types::{ReceiptKind, ReceiptStatus};
pub use validation::{NewLineItemInput, NewReceiptInput, ValidatedReceipt};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Series codes are always 4 characters: a kind prefix plus 3 digits.
pub const SERIES_LEN: usize = 4;

/// Tax identifiers are 11-digit numeric strings.
pub const TAX_ID_LEN: usize = 11;

/// Maximum length for names and item descriptions.
pub const MAX_NAME_LEN: usize = 500;

/// Maximum page size accepted by the list operation.
///
/// ## Business Reason
/// Keeps list responses bounded; clients page through larger result sets.
pub const MAX_PAGE_SIZE: u32 = 50;
