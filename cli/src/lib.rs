//! sqlreview CLI - schema-integrity review of DDL batches
//!
//! Reads a JSON statement batch, replays it against a catalog seeded from an
//! optional snapshot, runs the configured rules and reports the advice.
//!
//! # Quick Start
//!
//! 1. Run `sqlreview init --database shop` to create a `sqlreview.toml`
//! 2. Run `sqlreview check batch.json --snapshot schema.json`
//!
//! # Configuration
//!
//! ```toml
//! dialect = "mysql"
//! database = "shop"
//! mode = "strict"
//! case_sensitive = false
//! snapshot = "schema.json"
//!
//! [rules]
//! "table.require-pk" = "warning"
//! ```
//!
//! # Exit codes
//!
//! - `0` - no error advice
//! - `1` - at least one error advice
//! - `2` - usage, configuration or input failure

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use config::{Config, Error as ConfigError};
pub use error::CliError;
