//! # Query Contract
//!
//! Filter and pagination types shared between the core and the
//! persistence layer.
//!
//! Filters combine conjunctively (AND). Results are ordered by
//! `issued_at` descending with `id` descending as tie-break, so
//! pagination is deterministic even for receipts issued in the same
//! instant.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use crate::types::{ReceiptKind, ReceiptStatus};

// =============================================================================
// Filter
// =============================================================================

/// Conjunctive filter over the receipt listing.
///
/// Date bounds are UTC instants compared against `issued_at`; use
/// [`start_of_day_utc`] / [`end_of_day_utc`] to build them from
/// calendar days.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiptFilter {
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub kind: Option<ReceiptKind>,
    pub recipient_tax_id: Option<String>,
    pub status: Option<ReceiptStatus>,
}

// =============================================================================
// Pagination
// =============================================================================

/// A validated pagination window. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// Row offset of the first item in this window.
    #[inline]
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.page_size)
    }

    /// Maximum number of rows in this window.
    #[inline]
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

/// One page of results plus the size of the whole filtered set.
///
/// `total_count` is independent of the pagination window.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total_count: i64, page: PageRequest) -> Self {
        PagedResult {
            items,
            total_count,
            page: page.page,
            page_size: page.page_size,
        }
    }

    /// Maps the items while keeping the window metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

// =============================================================================
// Day Bounds
// =============================================================================

/// UTC midnight at the start of the given calendar day.
pub fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// The last stored instant of the given calendar day (23:59:59.999 UTC),
/// so a `dateTo` bound includes the whole day.
pub fn end_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    let end = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("constant time is valid");
    Utc.from_utc_datetime(&date.and_time(end))
}

// =============================================================================
// Unit Tests
// =============================================================================
