//! Shared type definitions for sqlreview
//!
//! This crate provides the entity records the schema catalog is built from:
//!
//! - [`Dialect`] - Database engine enum
//! - MySQL DDL records and type classification in the [`mysql`] module
//!
//! # Features
//!
//! - `serde` - Enable serde serialization/deserialization

mod dialect;
pub mod mysql;
#[cfg(feature = "serde")]
pub mod serde_helpers;

pub use dialect::{Dialect, DialectParseError};

/// Prelude module for commonly used types
pub mod prelude {
    pub use crate::Dialect;
    pub use crate::mysql::ddl::{Column, ColumnDef, Index, IndexDef, IndexType, Table, TableDef};
    pub use crate::mysql::{SqlType, TypeFamily};
}
