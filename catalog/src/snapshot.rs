//! Seed snapshots
//!
//! A [`DatabaseSnapshot`] is the persisted shape of a catalog: what the
//! database looked like before the reviewed statements run. It round-trips
//! through JSON and converts into a [`DatabaseState`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sqlreview_types::Dialect;
use sqlreview_types::mysql::ddl::{Column, Index, Table};
use thiserror::Error;

use crate::error::WalkThroughError;
use crate::state::{DatabaseState, IntegrityMode, TableState};
use crate::traits::IdentifierCase;

/// Errors loading or converting a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to access snapshot {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("inconsistent snapshot: {0}")]
    Inconsistent(#[from] WalkThroughError),
}

/// One table with its columns and indexes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSnapshot {
    #[serde(flatten)]
    pub table: Table,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub indexes: Vec<Index>,
}

/// Persisted database catalog
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseSnapshot {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    #[serde(default)]
    pub tables: Vec<TableSnapshot>,
}

impl DatabaseSnapshot {
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a snapshot file
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let json = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Write a snapshot file, pretty-printed
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        fs::write(path, self.to_json()?).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build the replay state. Tables become incomplete in lenient mode.
    pub fn into_state(
        self,
        dialect: Dialect,
        mode: IntegrityMode,
        case: IdentifierCase,
    ) -> Result<DatabaseState, SnapshotError> {
        let mut state = DatabaseState::new(self.name, dialect)
            .with_mode(mode)
            .with_case(case)?;
        state.charset = self.charset;
        state.collation = self.collation;

        for snapshot in self.tables {
            let mut table = TableState::new(snapshot.table);
            for column in snapshot.columns {
                table.seed_column(column)?;
            }
            for index in snapshot.indexes {
                table.seed_index(index)?;
            }
            state.seed_table(table)?;
        }
        Ok(state)
    }
}

impl DatabaseState {
    /// Export the current catalog: tables by name, columns by position,
    /// indexes with the primary key first
    pub fn snapshot(&self) -> DatabaseSnapshot {
        let mut tables: Vec<_> = self
            .schema
            .tables()
            .iter()
            .map(|t| TableSnapshot {
                table: t.table.clone(),
                columns: t.columns_by_position().into_iter().cloned().collect(),
                indexes: t.indexes_sorted().into_iter().cloned().collect(),
            })
            .collect();
        tables.sort_by(|a, b| a.table.name.cmp(&b.table.name));

        DatabaseSnapshot {
            name: self.name.clone(),
            charset: self.charset.clone(),
            collation: self.collation.clone(),
            tables,
        }
    }
}
