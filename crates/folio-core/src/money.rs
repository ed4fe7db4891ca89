//! # Money Module
//!
//! Decimal totals and tax calculation for receipts.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In binary floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  Receipts also carry fractional quantities (2.5 hours), so          │
//! │  integer cents are not enough either:                               │
//! │    2.5 × 150.00 must be exactly 375.00                              │
//! │                                                                     │
//! │  OUR SOLUTION: rust_decimal::Decimal                                │
//! │    Exact base-10 arithmetic end to end. The calculator never        │
//! │    rounds; only the storage boundary does.                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use folio_core::money::{line_subtotal, Totals};
//! use rust_decimal::Decimal;
//!
//! let lines = vec![
//!     line_subtotal(Decimal::new(1, 0), Decimal::new(100000, 2)),  // 1 × 1000.00
//!     line_subtotal(Decimal::new(25, 1), Decimal::new(15000, 2)),  // 2.5 × 150.00
//! ];
//! let totals = Totals::from_line_subtotals(lines);
//! assert_eq!(totals.subtotal, Decimal::new(137500, 2)); // 1375.00
//! assert_eq!(totals.tax, Decimal::new(24750, 2));       // 247.50
//! assert_eq!(totals.total, Decimal::new(162250, 2));    // 1622.50
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Scale used for money amounts at the storage/response boundary.
pub const MONEY_SCALE: u32 = 2;

/// Scale used for quantities at the storage/response boundary.
pub const QUANTITY_SCALE: u32 = 3;

/// The flat tax rate applied to every receipt subtotal (18%).
#[inline]
pub fn tax_rate() -> Decimal {
    Decimal::new(18, 2)
}

/// Computes one line's subtotal: `quantity × unit_price`.
///
/// Exact decimal multiplication, no rounding.
#[inline]
pub fn line_subtotal(quantity: Decimal, unit_price: Decimal) -> Decimal {
    quantity * unit_price
}

/// Rounds a money amount to storage precision (2 decimal places).
///
/// Midpoints round away from zero, matching a numeric(18,2) column.
/// Applied only when encoding rows or response bodies, never inside
/// the calculator.
#[inline]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a quantity to storage precision (3 decimal places).
#[inline]
pub fn round_quantity(quantity: Decimal) -> Decimal {
    quantity.round_dp_with_strategy(QUANTITY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

// =============================================================================
// Totals
// =============================================================================

/// Aggregate amounts of a receipt, computed once at construction.
///
/// Invariants: `tax = subtotal × 0.18` and `total = subtotal + tax`,
/// with `subtotal` the sum of the line subtotals in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl Totals {
    /// Computes aggregate totals from line subtotals, in input order.
    pub fn from_line_subtotals(lines: impl IntoIterator<Item = Decimal>) -> Self {
        let subtotal: Decimal = lines.into_iter().sum();
        let tax = subtotal * tax_rate();
        let total = subtotal + tax;

        Totals {
            subtotal,
            tax,
            total,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
