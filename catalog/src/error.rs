use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Advice and violation codes
///
/// Numbers are stable and shared with the review output; gaps belong to rule
/// families that are not implemented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Code {
    Ok = 0,
    Internal = 1,
    Unsupported = 3,

    StatementCreateTableAs = 205,

    ColumnNotExists = 405,
    ColumnExists = 412,
    DropAllColumns = 413,
    InvalidColumnDefault = 423,
    AutoIncrementExists = 426,
    SetNullDefaultForNotNullColumn = 427,
    OnUpdateColumnNotDatetimeOrTimestamp = 428,

    TableNoPk = 601,
    TableNotExists = 604,
    TableExists = 607,

    NotCurrentDatabase = 702,
    DatabaseIsDeleted = 703,
    ReferenceOtherDatabase = 705,

    IndexExists = 805,
    PrimaryKeyExists = 806,
    IndexEmptyKeys = 807,
    PrimaryKeyNotExists = 808,
    IndexNotExists = 809,
    IncorrectIndexName = 810,
    SpatialIndexKeyNullable = 811,
}

impl Code {
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Short title used when a violation is reported as advice
    pub const fn title(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Internal => "Internal error",
            Self::Unsupported => "Unsupported",
            Self::StatementCreateTableAs => "CREATE TABLE AS is disallowed",
            Self::ColumnNotExists => "Column does not exist",
            Self::ColumnExists => "Column already exists",
            Self::DropAllColumns => "Dropping all columns",
            Self::InvalidColumnDefault => "Invalid column default",
            Self::AutoIncrementExists => "Duplicate auto-increment column",
            Self::SetNullDefaultForNotNullColumn => "NULL default on NOT NULL column",
            Self::OnUpdateColumnNotDatetimeOrTimestamp => "Invalid ON UPDATE column",
            Self::TableNoPk => "Table has no primary key",
            Self::TableNotExists => "Table does not exist",
            Self::TableExists => "Table already exists",
            Self::NotCurrentDatabase => "Not the current database",
            Self::DatabaseIsDeleted => "Database is deleted",
            Self::ReferenceOtherDatabase => "Reference to another database",
            Self::IndexExists => "Index already exists",
            Self::PrimaryKeyExists => "Primary key already exists",
            Self::IndexEmptyKeys => "Index has empty key",
            Self::PrimaryKeyNotExists => "Primary key does not exist",
            Self::IndexNotExists => "Index does not exist",
            Self::IncorrectIndexName => "Incorrect index name",
            Self::SpatialIndexKeyNullable => "Nullable spatial index key",
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}

impl Serialize for Code {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.as_i32())
    }
}

/// The first invariant breach found while replaying a batch
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{content}")]
pub struct WalkThroughError {
    pub code: Code,
    pub content: String,
    /// Source line; stamped with the statement line when not set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, WalkThroughError>;

impl WalkThroughError {
    pub fn new(code: Code, content: impl Into<String>) -> Self {
        Self {
            code,
            content: content.into(),
            line: None,
        }
    }

    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Set the line only if none was recorded
    #[must_use]
    pub fn or_line(mut self, line: usize) -> Self {
        self.line.get_or_insert(line);
        self
    }

    pub fn table_not_exists(table: &str) -> Self {
        Self::new(Code::TableNotExists, format!("Table `{table}` does not exist"))
    }

    pub fn table_exists(table: &str) -> Self {
        Self::new(Code::TableExists, format!("Table `{table}` already exists"))
    }

    pub fn column_not_exists(table: &str, column: &str) -> Self {
        Self::new(
            Code::ColumnNotExists,
            format!("Column `{column}` does not exist in table `{table}`"),
        )
    }

    pub fn column_exists(table: &str, column: &str) -> Self {
        Self::new(
            Code::ColumnExists,
            format!("Column `{column}` already exists in table `{table}`"),
        )
    }

    pub fn index_not_exists(table: &str, index: &str) -> Self {
        Self::new(
            Code::IndexNotExists,
            format!("Index `{index}` does not exist in table `{table}`"),
        )
    }

    pub fn index_exists(table: &str, index: &str) -> Self {
        Self::new(
            Code::IndexExists,
            format!("Index `{index}` already exists in table `{table}`"),
        )
    }

    pub fn primary_key_exists(table: &str) -> Self {
        Self::new(
            Code::PrimaryKeyExists,
            format!("Primary key exists in table `{table}`"),
        )
    }

    pub fn primary_key_not_exists(table: &str) -> Self {
        Self::new(
            Code::PrimaryKeyNotExists,
            format!("Primary key does not exist in table `{table}`"),
        )
    }

    pub fn index_empty_keys(table: &str, index: &str) -> Self {
        Self::new(
            Code::IndexEmptyKeys,
            format!("Index `{index}` in table `{table}` has empty key"),
        )
    }

    pub fn incorrect_index_name(index: &str) -> Self {
        Self::new(
            Code::IncorrectIndexName,
            format!("Incorrect index name `{index}`"),
        )
    }

    pub fn spatial_key_nullable(column: &str) -> Self {
        Self::new(
            Code::SpatialIndexKeyNullable,
            format!("All parts of a SPATIAL index must be NOT NULL, but `{column}` is nullable"),
        )
    }

    pub fn drop_all_columns(table: &str) -> Self {
        // wording follows the MySQL server error
        Self::new(
            Code::DropAllColumns,
            format!("Can't delete all columns with ALTER TABLE; use DROP TABLE {table} instead"),
        )
    }

    pub fn default_forbidden(column: &str) -> Self {
        Self::new(
            Code::InvalidColumnDefault,
            format!("BLOB, TEXT, GEOMETRY or JSON column `{column}` can't have a default value"),
        )
    }

    pub fn null_default_for_not_null(column: &str) -> Self {
        Self::new(
            Code::SetNullDefaultForNotNullColumn,
            format!("Invalid default value for column `{column}`"),
        )
    }

    pub fn on_update_not_temporal(column: &str) -> Self {
        Self::new(
            Code::OnUpdateColumnNotDatetimeOrTimestamp,
            format!("Column `{column}` use ON UPDATE but is not DATETIME or TIMESTAMP"),
        )
    }

    pub fn auto_increment_exists(table: &str) -> Self {
        Self::new(
            Code::AutoIncrementExists,
            format!("There can be only one auto column for table `{table}`"),
        )
    }

    pub fn create_table_as(statement: &str) -> Self {
        Self::new(
            Code::StatementCreateTableAs,
            format!("Disallow the CREATE TABLE AS statement but \"{statement}\" uses"),
        )
    }

    pub fn reference_other_database(table: &str, database: &str) -> Self {
        Self::new(
            Code::ReferenceOtherDatabase,
            format!("Reference table `{table}` in other database `{database}`, skip walkthrough"),
        )
    }

    pub fn not_current_database(target: &str, current: &str) -> Self {
        Self::new(
            Code::NotCurrentDatabase,
            format!("Database `{target}` is not the current database `{current}`"),
        )
    }

    pub fn database_deleted(database: &str) -> Self {
        Self::new(
            Code::DatabaseIsDeleted,
            format!("Database `{database}` is deleted"),
        )
    }

    pub fn unsupported(content: impl Into<String>) -> Self {
        Self::new(Code::Unsupported, content)
    }
}
