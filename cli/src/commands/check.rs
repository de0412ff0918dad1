//! Check command - reviews a statement batch against the catalog

use std::path::{Path, PathBuf};

use sqlreview_catalog::{
    Advice, DatabaseSnapshot, DatabaseState, IdentifierCase, IntegrityMode, Registry, Statement,
    review,
};

use crate::config::Config;
use crate::error::CliError;

/// Flags of `sqlreview check`; each overrides the config when set
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    pub statements: PathBuf,
    pub snapshot: Option<PathBuf>,
    pub lenient: bool,
    pub case_sensitive: bool,
    /// Write the catalog as left by the replay
    pub save_snapshot: Option<PathBuf>,
}

pub fn run(config: &Config, opts: &CheckOptions) -> Result<Vec<Advice>, CliError> {
    let statements = load_statements(&opts.statements)?;
    if let Some(max) = config.max_statements
        && statements.len() > max
    {
        return Err(CliError::TooManyStatements {
            count: statements.len(),
            max,
        });
    }

    let mode = if opts.lenient {
        IntegrityMode::Lenient
    } else {
        config.mode
    };
    let case = if opts.case_sensitive {
        IdentifierCase::Sensitive
    } else {
        config.identifier_case()
    };

    let mut state = match opts.snapshot.as_ref().or(config.snapshot.as_ref()) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading seed snapshot");
            DatabaseSnapshot::load(path)?.into_state(config.dialect, mode, case)?
        }
        None => DatabaseState::new(config.database.clone(), config.dialect)
            .with_mode(mode)
            .with_case(case)?,
    };

    tracing::info!(
        statements = statements.len(),
        database = state.name(),
        dialect = %config.dialect,
        "reviewing batch"
    );
    let rules = config.rules()?;
    let advice = review(&mut state, &statements, &rules, &Registry::with_builtin());

    if let Some(path) = &opts.save_snapshot {
        state.snapshot().save(path)?;
    }
    Ok(advice)
}

fn load_statements(path: &Path) -> Result<Vec<Statement>, CliError> {
    let json = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Statement::list_from_json(&json).map_err(|source| CliError::Statements {
        path: path.to_path_buf(),
        source,
    })
}
