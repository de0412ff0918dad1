//! MySQL Table DDL types
//!
//! This module provides two complementary types:
//! - [`TableDef`] - A const-friendly definition type
//! - [`Table`] - A runtime type for table-level attributes
//!
//! Columns and indexes are stored next to the table by the catalog, not inside it.

use std::borrow::Cow;

#[cfg(feature = "serde")]
use crate::serde_helpers::{cow_from_string, cow_option_from_string};

// =============================================================================
// Const-friendly Definition Type
// =============================================================================

/// Const-friendly table definition
///
/// # Examples
///
/// ```
/// use sqlreview_types::mysql::ddl::TableDef;
///
/// const USERS: TableDef = TableDef::new("users").engine("InnoDB").comment("accounts");
/// let table = USERS.into_table();
/// assert_eq!(table.name(), "users");
/// assert_eq!(table.engine.as_deref(), Some("InnoDB"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TableDef {
    /// Table name
    pub name: &'static str,
    /// Storage engine
    pub engine: Option<&'static str>,
    /// Table collation
    pub collation: Option<&'static str>,
    /// Table comment
    pub comment: Option<&'static str>,
}

impl TableDef {
    /// Create a new table definition
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            engine: None,
            collation: None,
            comment: None,
        }
    }

    /// Set storage engine
    #[must_use]
    pub const fn engine(self, engine: &'static str) -> Self {
        Self {
            engine: Some(engine),
            ..self
        }
    }

    /// Set collation
    #[must_use]
    pub const fn collation(self, collation: &'static str) -> Self {
        Self {
            collation: Some(collation),
            ..self
        }
    }

    /// Set comment
    #[must_use]
    pub const fn comment(self, comment: &'static str) -> Self {
        Self {
            comment: Some(comment),
            ..self
        }
    }

    /// Convert to runtime type
    #[must_use]
    pub const fn into_table(self) -> Table {
        Table {
            name: Cow::Borrowed(self.name),
            engine: match self.engine {
                Some(e) => Some(Cow::Borrowed(e)),
                None => None,
            },
            collation: match self.collation {
                Some(c) => Some(Cow::Borrowed(c)),
                None => None,
            },
            comment: match self.comment {
                Some(c) => Some(Cow::Borrowed(c)),
                None => None,
            },
            complete: true,
        }
    }
}

// =============================================================================
// Runtime Type
// =============================================================================

/// Runtime table entity
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Table {
    /// Table name
    #[cfg_attr(feature = "serde", serde(deserialize_with = "cow_from_string"))]
    pub name: Cow<'static, str>,

    /// Storage engine
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            skip_serializing_if = "Option::is_none",
            deserialize_with = "cow_option_from_string"
        )
    )]
    pub engine: Option<Cow<'static, str>>,

    /// Table collation
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            skip_serializing_if = "Option::is_none",
            deserialize_with = "cow_option_from_string"
        )
    )]
    pub collation: Option<Cow<'static, str>>,

    /// Table comment
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            skip_serializing_if = "Option::is_none",
            deserialize_with = "cow_option_from_string"
        )
    )]
    pub comment: Option<Cow<'static, str>>,

    /// Whether every column and index of this table is known
    #[cfg_attr(feature = "serde", serde(default = "crate::serde_helpers::default_true"))]
    pub complete: bool,
}

impl Table {
    /// Create a new complete table with no options
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            engine: None,
            collation: None,
            comment: None,
            complete: true,
        }
    }

    /// Get the table name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<TableDef> for Table {
    fn from(def: TableDef) -> Self {
        def.into_table()
    }
}
