//! MySQL DDL entity types
//!
//! Each entity comes in two shapes:
//!
//! - **`*Def` types** - Const-friendly definitions using only `Copy` types
//!   (`&'static str`, `bool`), handy for seeding a catalog from code
//! - **Runtime types** - `Cow<'static, str>` based records held by the catalog,
//!   with optional attributes so placeholders can leave them unknown
//!
//! ```
//! use sqlreview_types::mysql::ddl::{ColumnDef, IndexDef, TableDef};
//!
//! const USERS: TableDef = TableDef::new("users").engine("InnoDB");
//! const USERS_COLUMNS: &[ColumnDef] = &[
//!     ColumnDef::new("id", "bigint").not_null(),
//!     ColumnDef::new("email", "varchar(255)").not_null(),
//! ];
//! const USERS_INDEXES: &[IndexDef] = &[
//!     IndexDef::primary_key(&["id"]),
//!     IndexDef::new("uk_email", &["email"]).unique(),
//! ];
//! ```

mod column;
mod index;
mod table;

// Const-friendly definition types
pub use column::ColumnDef;
pub use index::{IndexDef, IndexType};
pub use table::TableDef;

// Runtime types
pub use column::{Column, NULL_DEFAULT};
pub use index::{Index, PRIMARY_KEY_NAME, is_primary_key_name};
pub use table::Table;

#[cfg(feature = "serde")]
pub use crate::serde_helpers::{cow_from_string, cow_option_from_string};
