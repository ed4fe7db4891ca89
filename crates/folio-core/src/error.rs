//! # Error Types
//!
//! Domain-specific error types for folio-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  folio-core errors (this file)                                      │
//! │  ├── CoreError         - Domain rule violations                     │
//! │  └── ValidationErrors  - Collected input validation failures        │
//! │                                                                     │
//! │  folio-db errors (separate crate)                                   │
//! │  └── DbError           - Database operation failures                │
//! │                                                                     │
//! │  API errors (in app)                                                │
//! │  └── ApiError          - What callers see (status + body)           │
//! │                                                                     │
//! │  Flow: ValidationErrors → CoreError → ApiError → HTTP response      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (id, status, field names)
//! 3. Validation failures are collected, never reported one at a time

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent domain rule violations. They are caught at the
/// transport boundary and translated to caller-facing responses.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Receipt cannot be found.
    #[error("Receipt not found: {0}")]
    ReceiptNotFound(String),

    /// Illegal state transition: the receipt was already voided.
    ///
    /// ## When This Occurs
    /// - Calling void on a receipt whose status is already `Voided`
    #[error("Receipt {id} is already voided")]
    AlreadyVoided { id: String },

    /// Input validation failed (wraps the collected violations).
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Collected input validation failures, keyed by field.
///
/// The creation gate reports ALL violations together rather than
/// stopping at the first, so a caller can fix its request in one round
/// trip. Fields are ordered (BTreeMap) so output is deterministic.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation against a field.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// True when no violations were recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of offending fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The field → messages mapping.
    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    /// Messages recorded for one field, if any.
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    /// Consumes the collector: `Ok(value)` when empty, `Err(self)` otherwise.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
