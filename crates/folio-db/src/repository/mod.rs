//! # Repository Module
//!
//! Repository implementations for database access.
//!
//! ## Repository Pattern
//! Each aggregate gets a repository struct wrapping the pool. The
//! repository speaks domain types at its surface (entities in,
//! entities out) and keeps row encoding private: decimals become
//! fixed-scale text, enums become their text labels, and rehydration
//! goes through the core's trusted loader.

pub mod receipt;
