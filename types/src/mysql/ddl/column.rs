//! MySQL Column DDL types
//!
//! This module provides two complementary types:
//! - [`ColumnDef`] - A const-friendly definition type for seeding catalogs in code
//! - [`Column`] - A runtime type tracked by the catalog and read from snapshots

use std::borrow::Cow;

#[cfg(feature = "serde")]
use crate::serde_helpers::{cow_from_string, cow_option_from_string};

/// Literal text stored for `DEFAULT NULL`
pub const NULL_DEFAULT: &str = "NULL";

// =============================================================================
// Const-friendly Definition Type
// =============================================================================

/// Const-friendly column definition.
///
/// # Examples
///
/// ```
/// use sqlreview_types::mysql::ddl::ColumnDef;
///
/// const COLUMNS: &[ColumnDef] = &[
///     ColumnDef::new("id", "int").not_null(),
///     ColumnDef::new("name", "varchar(64)").default_value("''"),
///     ColumnDef::new("bio", "text").comment("free text"),
/// ];
///
/// let id = COLUMNS[0].into_column(1);
/// assert_eq!(id.position, Some(1));
/// assert_eq!(id.nullable, Some(false));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColumnDef {
    /// Column name
    pub name: &'static str,
    /// Declared type (e.g., "int", "varchar(20)")
    pub sql_type: &'static str,
    /// Is this column NOT NULL?
    pub not_null: bool,
    /// Default value as SQL text (if any)
    pub default: Option<&'static str>,
    /// Character set
    pub charset: Option<&'static str>,
    /// Collation
    pub collation: Option<&'static str>,
    /// Comment
    pub comment: Option<&'static str>,
}

impl ColumnDef {
    /// Create a new nullable column definition
    #[must_use]
    pub const fn new(name: &'static str, sql_type: &'static str) -> Self {
        Self {
            name,
            sql_type,
            not_null: false,
            default: None,
            charset: None,
            collation: None,
            comment: None,
        }
    }

    /// Set NOT NULL constraint
    #[must_use]
    pub const fn not_null(self) -> Self {
        Self {
            not_null: true,
            ..self
        }
    }

    /// Set default value
    #[must_use]
    pub const fn default_value(self, value: &'static str) -> Self {
        Self {
            default: Some(value),
            ..self
        }
    }

    /// Set character set
    #[must_use]
    pub const fn charset(self, charset: &'static str) -> Self {
        Self {
            charset: Some(charset),
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

    /// Convert to runtime type at the given 1-based position
    #[must_use]
    pub const fn into_column(self, position: u32) -> Column {
        Column {
            name: Cow::Borrowed(self.name),
            position: Some(position),
            nullable: Some(!self.not_null),
            sql_type: Some(Cow::Borrowed(self.sql_type)),
            default: match self.default {
                Some(d) => Some(Cow::Borrowed(d)),
                None => None,
            },
            charset: match self.charset {
                Some(c) => Some(Cow::Borrowed(c)),
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
            auto_increment: false,
            complete: true,
        }
    }
}

impl Default for ColumnDef {
    fn default() -> Self {
        Self::new("", "")
    }
}

// =============================================================================
// Runtime Type
// =============================================================================

/// Runtime column entity
///
/// Every attribute but the name is optional: a placeholder column created for
/// an unresolved reference only knows its name and has `complete == false`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Column {
    /// Column name
    #[cfg_attr(feature = "serde", serde(deserialize_with = "cow_from_string"))]
    pub name: Cow<'static, str>,

    /// 1-based ordinal position
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub position: Option<u32>,

    /// Whether NULL is allowed
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub nullable: Option<bool>,

    /// Declared type
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "type",
            default,
            skip_serializing_if = "Option::is_none",
            deserialize_with = "cow_option_from_string"
        )
    )]
    pub sql_type: Option<Cow<'static, str>>,

    /// Default as SQL text. `None` means no default; `Some("NULL")` is DEFAULT NULL.
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            skip_serializing_if = "Option::is_none",
            deserialize_with = "cow_option_from_string"
        )
    )]
    pub default: Option<Cow<'static, str>>,

    /// Character set
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            skip_serializing_if = "Option::is_none",
            deserialize_with = "cow_option_from_string"
        )
    )]
    pub charset: Option<Cow<'static, str>>,

    /// Collation
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            skip_serializing_if = "Option::is_none",
            deserialize_with = "cow_option_from_string"
        )
    )]
    pub collation: Option<Cow<'static, str>>,

    /// Comment
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            skip_serializing_if = "Option::is_none",
            deserialize_with = "cow_option_from_string"
        )
    )]
    pub comment: Option<Cow<'static, str>>,

    /// AUTO_INCREMENT column; at most one per table
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "crate::serde_helpers::is_false")
    )]
    pub auto_increment: bool,

    /// `false` for placeholders materialized in lenient mode
    #[cfg_attr(feature = "serde", serde(default = "crate::serde_helpers::default_true"))]
    pub complete: bool,
}

impl Column {
    /// Create a complete nullable column with the given type and no position yet
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, sql_type: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            position: None,
            nullable: Some(true),
            sql_type: Some(sql_type.into()),
            default: None,
            charset: None,
            collation: None,
            comment: None,
            auto_increment: false,
            complete: true,
        }
    }

    /// Create an incomplete placeholder that only knows its name
    #[must_use]
    pub fn placeholder(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            position: None,
            nullable: None,
            sql_type: None,
            default: None,
            charset: None,
            collation: None,
            comment: None,
            auto_increment: false,
            complete: false,
        }
    }

    /// Get the column name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` when the column is known to reject NULL
    #[inline]
    #[must_use]
    pub fn is_not_null(&self) -> bool {
        self.nullable == Some(false)
    }

    /// Returns `true` when the column carries an explicit `DEFAULT NULL`
    #[must_use]
    pub fn has_null_default(&self) -> bool {
        self.default
            .as_deref()
            .is_some_and(|d| d.eq_ignore_ascii_case(NULL_DEFAULT))
    }
}
