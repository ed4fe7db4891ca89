//! # Domain Types
//!
//! Closed enums for the receipt lifecycle, with text mapping used only
//! at the storage and transport boundaries.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌───────────────────────┐     ┌───────────────────────┐           │
//! │  │     ReceiptKind       │     │    ReceiptStatus      │           │
//! │  │  ───────────────────  │     │  ───────────────────  │           │
//! │  │  Invoice        (F)   │     │  Issued   (initial)   │           │
//! │  │  SimplifiedReceipt(B) │     │  Voided   (terminal)  │           │
//! │  └───────────────────────┘     └───────────────────────┘           │
//! │                                                                     │
//! │  Persisted as text ('invoice', 'voided', ...); domain code only    │
//! │  ever sees the closed variants.                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Receipt Kind
// =============================================================================

/// The kind of receipt, fixed at creation.
///
/// An `Invoice` requires a named, tax-identified recipient; a
/// `SimplifiedReceipt` may be issued to a walk-in customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptKind {
    Invoice,
    SimplifiedReceipt,
}

impl ReceiptKind {
    /// The letter a series of this kind must start with.
    #[inline]
    pub const fn series_prefix(&self) -> char {
        match self {
            ReceiptKind::Invoice => 'F',
            ReceiptKind::SimplifiedReceipt => 'B',
        }
    }

    /// Canonical text label, used at the storage boundary.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReceiptKind::Invoice => "invoice",
            ReceiptKind::SimplifiedReceipt => "simplified_receipt",
        }
    }

    /// True when this kind requires recipient identity.
    #[inline]
    pub const fn requires_recipient(&self) -> bool {
        matches!(self, ReceiptKind::Invoice)
    }
}

/// Label could not be mapped to a receipt kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown receipt kind: '{0}'")]
pub struct ParseReceiptKindError(pub String);

impl FromStr for ReceiptKind {
    type Err = ParseReceiptKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "invoice" => Ok(ReceiptKind::Invoice),
            "simplified_receipt" => Ok(ReceiptKind::SimplifiedReceipt),
            _ => Err(ParseReceiptKindError(s.to_string())),
        }
    }
}

impl fmt::Display for ReceiptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Receipt Status
// =============================================================================

/// Lifecycle state of a receipt.
///
/// `Issued` is set at construction; `Voided` is terminal. There are no
/// other states and no transition out of `Voided`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    Issued,
    Voided,
}

impl ReceiptStatus {
    /// Canonical text label, used at the storage boundary.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReceiptStatus::Issued => "issued",
            ReceiptStatus::Voided => "voided",
        }
    }
}

impl Default for ReceiptStatus {
    fn default() -> Self {
        ReceiptStatus::Issued
    }
}

/// Label could not be mapped to a receipt status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown receipt status: '{0}'")]
pub struct ParseReceiptStatusError(pub String);

impl FromStr for ReceiptStatus {
    type Err = ParseReceiptStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "issued" => Ok(ReceiptStatus::Issued),
            "voided" => Ok(ReceiptStatus::Voided),
            _ => Err(ParseReceiptStatusError(s.to_string())),
        }
    }
}

impl fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
