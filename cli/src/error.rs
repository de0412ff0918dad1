//! Error types for the CLI

use std::path::PathBuf;

use sqlreview_catalog::{SnapshotError, WalkThroughError};
use thiserror::Error;

use crate::config::ConfigError;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Seed or output snapshot error
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Catalog could not be prepared for replay
    #[error(transparent)]
    Catalog(#[from] WalkThroughError),

    /// Statements file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Statements file is not a valid statement batch
    #[error("invalid statements in {}: {source}", path.display())]
    Statements {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Batch exceeds `max_statements`
    #[error("batch has {count} statements, more than the configured maximum of {max}")]
    TooManyStatements { count: usize, max: usize },

    /// Report could not be rendered
    #[error("failed to render report: {0}")]
    Render(#[from] serde_json::Error),
}
