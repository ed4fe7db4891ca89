//! # Receipt Repository
//!
//! Database operations for receipts and their line items.
//!
//! ## Creation Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     create(validated input)                         │
//! │                                                                     │
//! │  1. ALLOCATE   next_number(series) = MAX(number) + 1, or 1          │
//! │  2. CONSTRUCT  Receipt::issue() computes id, issued_at, totals      │
//! │  3. INSERT     receipt + items in one transaction                   │
//! │        │                                                            │
//! │        ├── UNIQUE (series, number) violated?                        │
//! │        │      A concurrent creation won the number. Go back to      │
//! │        │      step 1, at most 3 attempts, then report a conflict.   │
//! │        │                                                            │
//! │        └── OK → receipt persisted                                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Money columns are text with 2 decimals, quantity with 3; rounding
//! happens here, at the storage boundary, never in the calculator.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::sqlite::Sqlite;
use sqlx::{FromRow, QueryBuilder, SqlitePool};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use folio_core::money::{round_money, round_quantity};
use folio_core::receipt::{LineItemRecord, ReceiptRecord};
use folio_core::{PageRequest, Receipt, ReceiptFilter, ValidatedReceipt};

/// Attempts before a numbering race is reported as a conflict.
const MAX_NUMBERING_ATTEMPTS: u32 = 3;

/// Repository for receipt database operations.
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    pool: SqlitePool,
}

// =============================================================================
// Row Types
// =============================================================================

/// One row of the `receipts` table, before decoding.
#[derive(Debug, FromRow)]
struct ReceiptRow {
    id: String,
    kind: String,
    series: String,
    number: i64,
    issued_at: DateTime<Utc>,
    issuer_tax_id: String,
    issuer_name: String,
    recipient_tax_id: Option<String>,
    recipient_name: Option<String>,
    subtotal: String,
    tax: String,
    total: String,
    status: String,
}

/// One row of the `receipt_items` table, before decoding.
#[derive(Debug, FromRow)]
struct ItemRow {
    receipt_id: String,
    description: String,
    quantity: String,
    unit_price: String,
    subtotal: String,
}

const RECEIPT_COLUMNS: &str = "id, kind, series, number, issued_at, \
     issuer_tax_id, issuer_name, recipient_tax_id, recipient_name, \
     subtotal, tax, total, status";

// =============================================================================
// Encoding / Decoding
// =============================================================================

/// Encodes a money amount for storage: rounded to 2 decimal places.
fn encode_money(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

/// Encodes a quantity for storage: rounded to 3 decimal places.
fn encode_quantity(value: Decimal) -> String {
    format!("{:.3}", round_quantity(value))
}

fn decode_decimal(table: &str, id: &str, value: &str) -> DbResult<Decimal> {
    Decimal::from_str(value).map_err(|e| DbError::corrupt_row(table, id, e))
}

/// Rebuilds the domain entity from its rows via the trusted loader.
fn decode_receipt(row: ReceiptRow, items: Vec<ItemRow>) -> DbResult<Receipt> {
    let kind = row
        .kind
        .parse()
        .map_err(|e| DbError::corrupt_row("receipts", &row.id, e))?;
    let status = row
        .status
        .parse()
        .map_err(|e| DbError::corrupt_row("receipts", &row.id, e))?;

    let items = items
        .into_iter()
        .map(|item| {
            Ok(LineItemRecord {
                quantity: decode_decimal("receipt_items", &item.receipt_id, &item.quantity)?,
                unit_price: decode_decimal("receipt_items", &item.receipt_id, &item.unit_price)?,
                subtotal: decode_decimal("receipt_items", &item.receipt_id, &item.subtotal)?,
                description: item.description,
            })
        })
        .collect::<DbResult<Vec<_>>>()?;

    let record = ReceiptRecord {
        kind,
        status,
        items,
        number: row.number,
        issued_at: row.issued_at,
        series: row.series,
        issuer_tax_id: row.issuer_tax_id,
        issuer_name: row.issuer_name,
        recipient_tax_id: row.recipient_tax_id,
        recipient_name: row.recipient_name,
        subtotal: decode_decimal("receipts", &row.id, &row.subtotal)?,
        tax: decode_decimal("receipts", &row.id, &row.tax)?,
        total: decode_decimal("receipts", &row.id, &row.total)?,
        id: row.id,
    };

    Ok(Receipt::from_record(record))
}

/// Appends the conjunctive WHERE clauses for a filter.
fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, filter: &ReceiptFilter) {
    if let Some(from) = filter.date_from {
        builder.push(" AND issued_at >= ").push_bind(from);
    }
    if let Some(to) = filter.date_to {
        builder.push(" AND issued_at <= ").push_bind(to);
    }
    if let Some(kind) = filter.kind {
        builder.push(" AND kind = ").push_bind(kind.as_str());
    }
    if let Some(tax_id) = &filter.recipient_tax_id {
        builder
            .push(" AND recipient_tax_id = ")
            .push_bind(tax_id.clone());
    }
    if let Some(status) = filter.status {
        builder.push(" AND status = ").push_bind(status.as_str());
    }
}

// =============================================================================
// Repository
// =============================================================================

impl ReceiptRepository {
    /// Creates a new ReceiptRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReceiptRepository { pool }
    }

    /// Gets a receipt with its line items by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Receipt>> {
        let row: Option<ReceiptRow> = sqlx::query_as(&format!(
            "SELECT {RECEIPT_COLUMNS} FROM receipts WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items: Vec<ItemRow> = sqlx::query_as(
            "SELECT receipt_id, description, quantity, unit_price, subtotal \
             FROM receipt_items WHERE receipt_id = ?1 ORDER BY line_no",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        decode_receipt(row, items).map(Some)
    }

    /// Checks whether a receipt with this ID exists.
    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM receipts WHERE id = ?1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    /// Lists receipts matching the filter, most recent first.
    ///
    /// Returns one page of receipts plus the total count of the
    /// filtered set, independent of the pagination window. Ordering is
    /// `issued_at DESC, id DESC` so pagination is deterministic.
    pub async fn list(
        &self,
        filter: &ReceiptFilter,
        page: PageRequest,
    ) -> DbResult<(Vec<Receipt>, i64)> {
        debug!(
            page = page.page,
            page_size = page.page_size,
            "Listing receipts"
        );

        let mut count_query =
            QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM receipts WHERE 1=1");
        push_filters(&mut count_query, filter);
        let total_count: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut page_query = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {RECEIPT_COLUMNS} FROM receipts WHERE 1=1"
        ));
        push_filters(&mut page_query, filter);
        page_query
            .push(" ORDER BY issued_at DESC, id DESC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows: Vec<ReceiptRow> = page_query
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        let ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
        let mut items_by_receipt = self.items_for(&ids).await?;

        let receipts = rows
            .into_iter()
            .map(|row| {
                let items = items_by_receipt.remove(&row.id).unwrap_or_default();
                decode_receipt(row, items)
            })
            .collect::<DbResult<Vec<_>>>()?;

        debug!(count = receipts.len(), total_count, "List returned receipts");
        Ok((receipts, total_count))
    }

    /// Loads line items for a set of receipts, grouped by receipt id.
    async fn items_for(&self, ids: &[String]) -> DbResult<HashMap<String, Vec<ItemRow>>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT receipt_id, description, quantity, unit_price, subtotal \
             FROM receipt_items WHERE receipt_id IN (",
        );
        {
            let mut separated = query.separated(", ");
            for id in ids {
                separated.push_bind(id.clone());
            }
        }
        query.push(") ORDER BY receipt_id, line_no");

        let rows: Vec<ItemRow> = query.build_query_as().fetch_all(&self.pool).await?;

        let mut grouped: HashMap<String, Vec<ItemRow>> = HashMap::new();
        for row in rows {
            grouped.entry(row.receipt_id.clone()).or_default().push(row);
        }
        Ok(grouped)
    }

    /// Returns the next sequential number for a series.
    ///
    /// MAX + 1, or 1 when the series has no receipts yet. This read is
    /// not atomic with the subsequent insert; the `(series, number)`
    /// unique index is what actually defends the invariant, and
    /// [`ReceiptRepository::create`] retries on a lost race.
    pub async fn next_number(&self, series: &str) -> DbResult<i64> {
        let next: i64 =
            sqlx::query_scalar("SELECT COALESCE(MAX(number), 0) + 1 FROM receipts WHERE series = ?1")
                .bind(series)
                .fetch_one(&self.pool)
                .await?;

        debug!(series = %series, next, "Allocated next receipt number");
        Ok(next)
    }

    /// Inserts a receipt and its line items in one transaction.
    pub async fn insert(&self, receipt: &Receipt) -> DbResult<()> {
        debug!(
            id = %receipt.id(),
            series = %receipt.series(),
            number = receipt.number(),
            "Inserting receipt"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO receipts ( \
                id, kind, series, number, issued_at, \
                issuer_tax_id, issuer_name, recipient_tax_id, recipient_name, \
                subtotal, tax, total, status \
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        )
        .bind(receipt.id())
        .bind(receipt.kind().as_str())
        .bind(receipt.series())
        .bind(receipt.number())
        .bind(receipt.issued_at())
        .bind(receipt.issuer_tax_id())
        .bind(receipt.issuer_name())
        .bind(receipt.recipient_tax_id())
        .bind(receipt.recipient_name())
        .bind(encode_money(receipt.subtotal()))
        .bind(encode_money(receipt.tax()))
        .bind(encode_money(receipt.total()))
        .bind(receipt.status().as_str())
        .execute(&mut *tx)
        .await?;

        for (index, item) in receipt.items().iter().enumerate() {
            sqlx::query(
                "INSERT INTO receipt_items ( \
                    id, receipt_id, line_no, description, quantity, unit_price, subtotal \
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(receipt.id())
            .bind(index as i64 + 1)
            .bind(item.description())
            .bind(encode_quantity(item.quantity()))
            .bind(encode_money(item.unit_price()))
            .bind(encode_money(item.subtotal()))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Creates a receipt: allocate a number, construct, insert.
    ///
    /// A lost numbering race surfaces as a unique violation on
    /// `(series, number)`; the sequence is retried a bounded number of
    /// times before reporting a conflict.
    pub async fn create(&self, input: ValidatedReceipt) -> DbResult<Receipt> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let number = self.next_number(&input.series).await?;
            let receipt = Receipt::issue(input.clone(), number);

            debug!(
                series = %receipt.series(),
                number,
                subtotal = %receipt.subtotal(),
                tax = %receipt.tax(),
                total = %receipt.total(),
                "Constructed receipt"
            );

            match self.insert(&receipt).await {
                Ok(()) => {
                    info!(
                        id = %receipt.id(),
                        series = %receipt.series(),
                        number = receipt.number(),
                        total = %receipt.total(),
                        "Receipt created"
                    );
                    return Ok(receipt);
                }
                Err(DbError::UniqueViolation { .. }) if attempt < MAX_NUMBERING_ATTEMPTS => {
                    warn!(
                        series = %input.series,
                        number,
                        attempt,
                        "Numbering collision, retrying allocation"
                    );
                }
                Err(DbError::UniqueViolation { .. }) => {
                    return Err(DbError::conflict(format!(
                        "could not allocate a number for series {} after {} attempts",
                        input.series, attempt
                    )));
                }
                Err(other) => return Err(other),
            }
        }
    }

    /// Persists a receipt's status transition.
    ///
    /// The UPDATE is guarded so it only applies an actual transition;
    /// when it matches no rows the receipt is either missing (NotFound)
    /// or already in the target state (Conflict) - e.g. two void
    /// requests racing, where the loser must fail.
    pub async fn update(&self, receipt: &Receipt) -> DbResult<()> {
        let status = receipt.status().as_str();

        let result = sqlx::query("UPDATE receipts SET status = ?2 WHERE id = ?1 AND status <> ?2")
            .bind(receipt.id())
            .bind(status)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            if self.exists(receipt.id()).await? {
                return Err(DbError::conflict(format!(
                    "Receipt {} is already {}",
                    receipt.id(),
                    status
                )));
            }
            return Err(DbError::not_found("Receipt", receipt.id()));
        }

        info!(id = %receipt.id(), status = %status, "Receipt status updated");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::TimeZone;
    use folio_core::receipt::LineItem;
    use folio_core::types::{ReceiptKind, ReceiptStatus};
    use folio_core::validation::ValidatedReceipt;
    use folio_core::query::{end_of_day_utc, start_of_day_utc};
    use rust_decimal_macros::dec;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn page(page: u32, page_size: u32) -> PageRequest {
        PageRequest { page, page_size }
    }

    fn invoice_input(series: &str) -> ValidatedReceipt {
        ValidatedReceipt {
            kind: ReceiptKind::Invoice,
            series: series.to_string(),
            issuer_tax_id: "20123456789".to_string(),
            issuer_name: "Acme Consulting".to_string(),
            recipient_tax_id: Some("20987654321".to_string()),
            recipient_name: Some("Client Corp".to_string()),
            items: vec![
                LineItem::new("Consulting services", dec!(1), dec!(1000.00)),
                LineItem::new("Additional hours", dec!(2.5), dec!(150.00)),
            ],
        }
    }

    /// Builds a receipt through the trusted loader so tests can pin
    /// ids, timestamps and statuses.
    #[allow(clippy::too_many_arguments)]
    fn stored_receipt(
        id: &str,
        kind: ReceiptKind,
        series: &str,
        number: i64,
        issued_at: DateTime<Utc>,
        recipient_tax_id: Option<&str>,
        status: ReceiptStatus,
    ) -> Receipt {
        Receipt::from_record(ReceiptRecord {
            id: id.to_string(),
            kind,
            series: series.to_string(),
            number,
            issued_at,
            issuer_tax_id: "20123456789".to_string(),
            issuer_name: "Acme Consulting".to_string(),
            recipient_tax_id: recipient_tax_id.map(str::to_string),
            recipient_name: recipient_tax_id.map(|_| "Client Corp".to_string()),
            subtotal: dec!(100.00),
            tax: dec!(18.00),
            total: dec!(118.00),
            status,
            items: vec![LineItemRecord {
                description: "Item".to_string(),
                quantity: dec!(1.000),
                unit_price: dec!(100.00),
                subtotal: dec!(100.00),
            }],
        })
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let db = test_db().await;
        let repo = db.receipts();

        let receipt = Receipt::issue(invoice_input("F001"), 1);
        repo.insert(&receipt).await.unwrap();

        let loaded = repo.get_by_id(receipt.id()).await.unwrap().unwrap();
        assert_eq!(loaded.id(), receipt.id());
        assert_eq!(loaded.kind(), ReceiptKind::Invoice);
        assert_eq!(loaded.series(), "F001");
        assert_eq!(loaded.number(), 1);
        assert_eq!(loaded.status(), ReceiptStatus::Issued);
        assert_eq!(loaded.subtotal(), dec!(1375.00));
        assert_eq!(loaded.tax(), dec!(247.50));
        assert_eq!(loaded.total(), dec!(1622.50));
        assert_eq!(loaded.recipient_tax_id(), Some("20987654321"));

        // Items come back in input order with their stored precision.
        assert_eq!(loaded.items().len(), 2);
        assert_eq!(loaded.items()[0].description(), "Consulting services");
        assert_eq!(loaded.items()[1].description(), "Additional hours");
        assert_eq!(loaded.items()[1].quantity(), dec!(2.500));
        assert_eq!(loaded.items()[1].subtotal(), dec!(375.00));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = test_db().await;
        let repo = db.receipts();

        let loaded = repo.get_by_id("no-such-id").await.unwrap();
        assert!(loaded.is_none());
        assert!(!repo.exists("no-such-id").await.unwrap());
    }

    #[tokio::test]
    async fn test_next_number_starts_at_one_per_series() {
        let db = test_db().await;
        let repo = db.receipts();

        assert_eq!(repo.next_number("F001").await.unwrap(), 1);

        repo.insert(&stored_receipt(
            "id-1",
            ReceiptKind::Invoice,
            "F001",
            5,
            utc(2026, 1, 1, 10, 0),
            Some("20987654321"),
            ReceiptStatus::Issued,
        ))
        .await
        .unwrap();

        assert_eq!(repo.next_number("F001").await.unwrap(), 6);
        // Other series are numbered independently.
        assert_eq!(repo.next_number("F002").await.unwrap(), 1);
        assert_eq!(repo.next_number("B001").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_allocates_sequentially() {
        let db = test_db().await;
        let repo = db.receipts();

        let first = repo.create(invoice_input("F001")).await.unwrap();
        let second = repo.create(invoice_input("F001")).await.unwrap();

        assert_eq!(first.number(), 1);
        assert_eq!(second.number(), 2);
        assert_ne!(first.id(), second.id());

        let loaded = repo.get_by_id(second.id()).await.unwrap().unwrap();
        assert_eq!(loaded.number(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_number_is_a_unique_violation() {
        let db = test_db().await;
        let repo = db.receipts();

        let issued_at = utc(2026, 1, 1, 10, 0);
        repo.insert(&stored_receipt(
            "id-1",
            ReceiptKind::Invoice,
            "F001",
            1,
            issued_at,
            None,
            ReceiptStatus::Issued,
        ))
        .await
        .unwrap();

        let err = repo
            .insert(&stored_receipt(
                "id-2",
                ReceiptKind::Invoice,
                "F001",
                1,
                issued_at,
                None,
                ReceiptStatus::Issued,
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));

        // The losing transaction left nothing behind.
        assert!(!repo.exists("id-2").await.unwrap());
    }

    #[tokio::test]
    async fn test_void_persists_and_guards_double_void() {
        let db = test_db().await;
        let repo = db.receipts();

        let receipt = repo.create(invoice_input("F001")).await.unwrap();

        let mut loaded = repo.get_by_id(receipt.id()).await.unwrap().unwrap();
        loaded.void().unwrap();
        repo.update(&loaded).await.unwrap();

        let voided = repo.get_by_id(receipt.id()).await.unwrap().unwrap();
        assert_eq!(voided.status(), ReceiptStatus::Voided);
        // Amounts survive the void untouched.
        assert_eq!(voided.total(), dec!(1622.50));

        // Replaying the same transition is a storage-level conflict.
        let err = repo.update(&loaded).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_receipt_is_not_found() {
        let db = test_db().await;
        let repo = db.receipts();

        let mut ghost = stored_receipt(
            "ghost",
            ReceiptKind::Invoice,
            "F001",
            1,
            utc(2026, 1, 1, 10, 0),
            None,
            ReceiptStatus::Issued,
        );
        ghost.void().unwrap();

        let err = repo.update(&ghost).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_orders_most_recent_first_and_paginates() {
        let db = test_db().await;
        let repo = db.receipts();

        for (id, number, ts) in [
            ("id-old", 1, utc(2026, 1, 1, 9, 0)),
            ("id-mid", 2, utc(2026, 1, 2, 9, 0)),
            ("id-new", 3, utc(2026, 1, 3, 9, 0)),
        ] {
            repo.insert(&stored_receipt(
                id,
                ReceiptKind::Invoice,
                "F001",
                number,
                ts,
                None,
                ReceiptStatus::Issued,
            ))
            .await
            .unwrap();
        }

        let filter = ReceiptFilter::default();
        let (items, total) = repo.list(&filter, page(1, 2)).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id(), "id-new");
        assert_eq!(items[1].id(), "id-mid");

        let (items, total) = repo.list(&filter, page(2, 2)).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id(), "id-old");
    }

    #[tokio::test]
    async fn test_list_tie_breaks_on_id() {
        let db = test_db().await;
        let repo = db.receipts();

        let same_instant = utc(2026, 1, 1, 12, 0);
        for (id, number) in [("id-a", 1), ("id-b", 2)] {
            repo.insert(&stored_receipt(
                id,
                ReceiptKind::Invoice,
                "F001",
                number,
                same_instant,
                None,
                ReceiptStatus::Issued,
            ))
            .await
            .unwrap();
        }

        let (items, _) = repo.list(&ReceiptFilter::default(), page(1, 10)).await.unwrap();
        assert_eq!(items[0].id(), "id-b");
        assert_eq!(items[1].id(), "id-a");
    }

    #[tokio::test]
    async fn test_list_filters_combine_conjunctively() {
        let db = test_db().await;
        let repo = db.receipts();

        repo.insert(&stored_receipt(
            "id-invoice",
            ReceiptKind::Invoice,
            "F001",
            1,
            utc(2026, 1, 10, 9, 0),
            Some("20987654321"),
            ReceiptStatus::Issued,
        ))
        .await
        .unwrap();
        repo.insert(&stored_receipt(
            "id-simplified",
            ReceiptKind::SimplifiedReceipt,
            "B001",
            1,
            utc(2026, 1, 11, 9, 0),
            None,
            ReceiptStatus::Issued,
        ))
        .await
        .unwrap();
        repo.insert(&stored_receipt(
            "id-voided",
            ReceiptKind::Invoice,
            "F001",
            2,
            utc(2026, 1, 12, 9, 0),
            Some("20111111111"),
            ReceiptStatus::Voided,
        ))
        .await
        .unwrap();

        let filter = ReceiptFilter {
            kind: Some(ReceiptKind::Invoice),
            ..Default::default()
        };
        let (items, total) = repo.list(&filter, page(1, 10)).await.unwrap();
        assert_eq!(total, 2);
        assert!(items.iter().all(|r| r.kind() == ReceiptKind::Invoice));

        let filter = ReceiptFilter {
            status: Some(ReceiptStatus::Voided),
            ..Default::default()
        };
        let (items, total) = repo.list(&filter, page(1, 10)).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(items[0].id(), "id-voided");

        let filter = ReceiptFilter {
            recipient_tax_id: Some("20987654321".to_string()),
            ..Default::default()
        };
        let (items, _) = repo.list(&filter, page(1, 10)).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id(), "id-invoice");

        // kind AND status together narrow further.
        let filter = ReceiptFilter {
            kind: Some(ReceiptKind::Invoice),
            status: Some(ReceiptStatus::Issued),
            ..Default::default()
        };
        let (items, total) = repo.list(&filter, page(1, 10)).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(items[0].id(), "id-invoice");
    }

    #[tokio::test]
    async fn test_list_date_to_includes_whole_day() {
        let db = test_db().await;
        let repo = db.receipts();

        // Late on the 15th and early on the 16th, UTC.
        repo.insert(&stored_receipt(
            "id-on-day",
            ReceiptKind::Invoice,
            "F001",
            1,
            utc(2026, 1, 15, 23, 30),
            None,
            ReceiptStatus::Issued,
        ))
        .await
        .unwrap();
        repo.insert(&stored_receipt(
            "id-after",
            ReceiptKind::Invoice,
            "F001",
            2,
            utc(2026, 1, 16, 0, 30),
            None,
            ReceiptStatus::Issued,
        ))
        .await
        .unwrap();

        let day_15 = chrono::NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let day_16 = chrono::NaiveDate::from_ymd_opt(2026, 1, 16).unwrap();

        let filter = ReceiptFilter {
            date_to: Some(end_of_day_utc(day_15)),
            ..Default::default()
        };
        let (items, total) = repo.list(&filter, page(1, 10)).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(items[0].id(), "id-on-day");

        let filter = ReceiptFilter {
            date_from: Some(start_of_day_utc(day_16)),
            ..Default::default()
        };
        let (items, total) = repo.list(&filter, page(1, 10)).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(items[0].id(), "id-after");

        let filter = ReceiptFilter {
            date_from: Some(start_of_day_utc(day_15)),
            date_to: Some(end_of_day_utc(day_15)),
            ..Default::default()
        };
        let (_, total) = repo.list(&filter, page(1, 10)).await.unwrap();
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_deleting_a_receipt_cascades_to_items() {
        let db = test_db().await;
        let repo = db.receipts();

        let receipt = repo.create(invoice_input("F001")).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM receipt_items")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 2);

        sqlx::query("DELETE FROM receipts WHERE id = ?1")
            .bind(receipt.id())
            .execute(db.pool())
            .await
            .unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM receipt_items")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
