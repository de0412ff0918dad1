//! Init command - writes a starter `sqlreview.toml`

use std::path::Path;

use anyhow::{Context, bail};
use sqlreview_types::Dialect;

use crate::config;

pub fn run(path: &Path, dialect: Dialect, database: &str) -> anyhow::Result<()> {
    if path.exists() {
        bail!(
            "{} already exists. Delete it first to reinitialize.",
            path.display()
        );
    }
    if !dialect.is_mysql_family() {
        tracing::warn!(%dialect, "dialect has no walk-through support");
    }

    std::fs::write(path, config::template(dialect, database))
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
