//! Configuration for the sqlreview CLI
//!
//! Handles loading `sqlreview.toml`.

use serde::Deserialize;
use sqlreview_catalog::{IdentifierCase, IntegrityMode, Rule, RuleLevel, RuleType};
use sqlreview_types::Dialect;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "sqlreview.toml";

// ============================================================================
// Config
// ============================================================================

/// Parsed `sqlreview.toml`
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Engine the reviewed statements target
    pub dialect: Dialect,

    /// Current database; empty accepts any qualifier
    pub database: String,

    pub mode: IntegrityMode,

    /// Compare table and view names case-sensitively
    pub case_sensitive: bool,

    /// Seed snapshot, relative to the working directory
    pub snapshot: Option<PathBuf>,

    /// Refuse batches longer than this
    pub max_statements: Option<usize>,

    /// Rule name to level, e.g. `"table.require-pk" = "warning"`
    pub rules: BTreeMap<String, RuleLevel>,
}

impl Config {
    /// Load `sqlreview.toml` from the working directory
    pub fn load() -> Result<Self, Error> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load from specific path
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound(path.into())
            } else {
                Error::Io(path.into(), e)
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| Error::Parse(path.into(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else `sqlreview.toml` when present, else defaults
    pub fn discover(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(path) => Self::load_from(path),
            None if Path::new(CONFIG_FILE).exists() => Self::load(),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), Error> {
        if self.max_statements == Some(0) {
            return Err(Error::Invalid("max_statements must be at least 1".into()));
        }
        self.rules().map(|_| ())
    }

    /// Configured rules in name order
    pub fn rules(&self) -> Result<Vec<Rule>, Error> {
        self.rules
            .iter()
            .map(|(name, level)| {
                let rule_type = name.parse::<RuleType>().map_err(Error::Invalid)?;
                Ok(Rule {
                    rule_type,
                    level: *level,
                })
            })
            .collect()
    }

    #[inline]
    pub const fn identifier_case(&self) -> IdentifierCase {
        IdentifierCase::from_sensitive(self.case_sensitive)
    }
}

/// Template written by `sqlreview init`
pub fn template(dialect: Dialect, database: &str) -> String {
    let rules = RuleType::ALL
        .iter()
        .map(|rule| format!("\"{rule}\" = \"error\""))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"# sqlreview configuration

dialect = "{dialect}"
database = "{database}"
mode = "strict"
case_sensitive = false
# snapshot = "schema.json"
# max_statements = 1000

[rules]
{rules}
"#
    )
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type ConfigError = Error;

// ============================================================================
// Tests
// ============================================================================
