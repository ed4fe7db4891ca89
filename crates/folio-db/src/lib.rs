//! # folio-db: Database Layer for folio
//!
//! This crate provides database access for folio. It uses SQLite for
//! storage with sqlx for async operations, and is the collaborator
//! that enforces the invariants the core cannot: `(series, number)`
//! uniqueness and referential integrity between a receipt and its
//! items.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        folio Data Flow                              │
//! │                                                                     │
//! │  API handler (create_receipt)                                       │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                     folio-db (THIS CRATE)                   │   │
//! │  │                                                             │   │
//! │  │   ┌───────────────┐   ┌────────────────┐   ┌────────────┐  │   │
//! │  │   │   Database    │   │  Repositories  │   │ Migrations │  │   │
//! │  │   │   (pool.rs)   │◄──│  (receipt.rs)  │   │ (embedded) │  │   │
//! │  │   └───────────────┘   └────────────────┘   └────────────┘  │   │
//! │  │                                                             │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite database (WAL mode, foreign keys ON)                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Receipt repository

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::receipt::ReceiptRepository;
