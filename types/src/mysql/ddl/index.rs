//! MySQL Index DDL types
//!
//! This module provides two complementary types:
//! - [`IndexDef`] - A const-friendly definition type for seeding catalogs in code
//! - [`Index`] - A runtime type tracked by the catalog and read from snapshots

use std::borrow::Cow;

#[cfg(feature = "serde")]
use crate::serde_helpers::{cow_from_string, cow_option_from_string};

/// Name reserved for the primary key
pub const PRIMARY_KEY_NAME: &str = "PRIMARY";

/// Returns `true` if `name` is the reserved primary key name (case-insensitive)
#[inline]
#[must_use]
pub fn is_primary_key_name(name: &str) -> bool {
    name.eq_ignore_ascii_case(PRIMARY_KEY_NAME)
}

// =============================================================================
// Index Type
// =============================================================================

/// Index method or kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum IndexType {
    #[default]
    Btree,
    Hash,
    Rtree,
    #[cfg_attr(feature = "serde", serde(rename = "FULLTEXT"))]
    FullText,
    Spatial,
}

impl IndexType {
    /// SQL keyword for this index type
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Btree => "BTREE",
            Self::Hash => "HASH",
            Self::Rtree => "RTREE",
            Self::FullText => "FULLTEXT",
            Self::Spatial => "SPATIAL",
        }
    }
}

impl core::fmt::Display for IndexType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Const-friendly Definition Type
// =============================================================================

/// Const-friendly index definition
///
/// # Examples
///
/// ```
/// use sqlreview_types::mysql::ddl::IndexDef;
///
/// const PK: IndexDef = IndexDef::primary_key(&["id"]);
/// const BY_EMAIL: IndexDef = IndexDef::new("uk_email", &["email"]).unique();
///
/// assert_eq!(PK.name, "PRIMARY");
/// assert!(BY_EMAIL.into_index().unique == Some(true));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndexDef {
    /// Index name
    pub name: &'static str,
    /// Key columns or expressions
    pub expressions: &'static [&'static str],
    /// Index method
    pub index_type: IndexType,
    /// Is this a UNIQUE index?
    pub unique: bool,
    /// Is this the primary key?
    pub primary: bool,
    /// Is this index visible to the optimizer?
    pub visible: bool,
    /// Comment
    pub comment: Option<&'static str>,
}

impl IndexDef {
    /// Create a new visible BTREE index definition
    #[must_use]
    pub const fn new(name: &'static str, expressions: &'static [&'static str]) -> Self {
        Self {
            name,
            expressions,
            index_type: IndexType::Btree,
            unique: false,
            primary: false,
            visible: true,
            comment: None,
        }
    }

    /// Create the primary key definition over the given columns
    #[must_use]
    pub const fn primary_key(expressions: &'static [&'static str]) -> Self {
        Self {
            unique: true,
            primary: true,
            ..Self::new(PRIMARY_KEY_NAME, expressions)
        }
    }

    /// Set UNIQUE
    #[must_use]
    pub const fn unique(self) -> Self {
        Self {
            unique: true,
            ..self
        }
    }

    /// Set the index method
    #[must_use]
    pub const fn index_type(self, index_type: IndexType) -> Self {
        Self { index_type, ..self }
    }

    /// Mark as INVISIBLE
    #[must_use]
    pub const fn invisible(self) -> Self {
        Self {
            visible: false,
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
    pub fn into_index(self) -> Index {
        Index {
            name: Cow::Borrowed(self.name),
            expressions: Some(self.expressions.iter().map(|e| (*e).to_string()).collect()),
            index_type: Some(self.index_type),
            unique: Some(self.unique),
            primary: Some(self.primary),
            visible: Some(self.visible),
            comment: self.comment.map(Cow::Borrowed),
            complete: true,
        }
    }
}

// =============================================================================
// Runtime Type
// =============================================================================

/// Runtime index entity
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Index {
    /// Index name (`PRIMARY` for the primary key)
    #[cfg_attr(feature = "serde", serde(deserialize_with = "cow_from_string"))]
    pub name: Cow<'static, str>,

    /// Ordered key columns or expressions; unknown for placeholders
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub expressions: Option<Vec<String>>,

    /// Index method
    #[cfg_attr(
        feature = "serde",
        serde(rename = "type", default, skip_serializing_if = "Option::is_none")
    )]
    pub index_type: Option<IndexType>,

    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub unique: Option<bool>,

    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub primary: Option<bool>,

    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub visible: Option<bool>,

    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            skip_serializing_if = "Option::is_none",
            deserialize_with = "cow_option_from_string"
        )
    )]
    pub comment: Option<Cow<'static, str>>,

    /// `false` for placeholders materialized in lenient mode
    #[cfg_attr(feature = "serde", serde(default = "crate::serde_helpers::default_true"))]
    pub complete: bool,
}

impl Index {
    /// Create a complete, visible, non-unique index
    #[must_use]
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        expressions: Vec<String>,
        index_type: IndexType,
    ) -> Self {
        Self {
            name: name.into(),
            expressions: Some(expressions),
            index_type: Some(index_type),
            unique: Some(false),
            primary: Some(false),
            visible: Some(true),
            comment: None,
            complete: true,
        }
    }

    /// Create an incomplete placeholder that only knows its name
    #[must_use]
    pub fn placeholder(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            expressions: None,
            index_type: None,
            unique: None,
            primary: None,
            visible: None,
            comment: None,
            complete: false,
        }
    }

    /// Get the index name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` for the primary key
    #[inline]
    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.primary == Some(true)
    }

    /// Key expressions, empty when unknown
    #[must_use]
    pub fn expressions(&self) -> &[String] {
        self.expressions.as_deref().unwrap_or_default()
    }
}
