//! MySQL type definitions
//!
//! - [`ddl`] - table, column and index records
//! - [`SqlType`] / [`TypeFamily`] - declared column type classification

pub mod ddl;
mod sql_type;

pub use sql_type::{SqlType, TypeFamily};
