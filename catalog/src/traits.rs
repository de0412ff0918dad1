//! Core traits for catalog entities
//!
//! - `Entity` - Trait for named catalog entities with const KIND
//! - `EntityKind` - Enum of the entity kinds the catalog tracks
//! - `IdentifierCase` - How identifiers are compared

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use sqlreview_types::mysql::ddl::{Column, Index};

// =============================================================================
// Entity Kind
// =============================================================================

/// Kind of catalog entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Table,
    View,
    Column,
    Index,
}

impl EntityKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::View => "view",
            Self::Column => "column",
            Self::Index => "index",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Entity Trait
// =============================================================================

/// A named entity stored in a [`Collection`](crate::collection::Collection).
pub trait Entity: Clone {
    /// The entity kind (discriminator)
    const KIND: EntityKind;

    /// The entity's display name
    fn name(&self) -> &str;

    /// Replace the entity's name
    fn set_name(&mut self, name: String);
}

impl Entity for Column {
    const KIND: EntityKind = EntityKind::Column;

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = Cow::Owned(name);
    }
}

impl Entity for Index {
    const KIND: EntityKind = EntityKind::Index;

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = Cow::Owned(name);
    }
}

// =============================================================================
// Identifier Comparison
// =============================================================================

/// Identifier comparison mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierCase {
    /// Compare ASCII-case-insensitively (MySQL `lower_case_table_names=1`)
    #[default]
    Insensitive,
    /// Compare byte for byte
    Sensitive,
}

impl IdentifierCase {
    /// Lookup key for `name` under this mode
    pub fn fold<'a>(self, name: &'a str) -> Cow<'a, str> {
        match self {
            Self::Insensitive if name.bytes().any(|b| b.is_ascii_uppercase()) => {
                Cow::Owned(name.to_ascii_lowercase())
            }
            _ => Cow::Borrowed(name),
        }
    }

    /// Compare two identifiers under this mode
    pub fn equals(self, a: &str, b: &str) -> bool {
        match self {
            Self::Insensitive => a.eq_ignore_ascii_case(b),
            Self::Sensitive => a == b,
        }
    }

    pub const fn from_sensitive(case_sensitive: bool) -> Self {
        if case_sensitive {
            Self::Sensitive
        } else {
            Self::Insensitive
        }
    }
}
