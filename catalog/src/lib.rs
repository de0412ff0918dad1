//! In-memory schema catalog and DDL walk-through
//!
//! A [`DatabaseState`] is seeded from an optional [`DatabaseSnapshot`] and
//! then replays parsed [`Statement`]s in order. The first statement that
//! would break a schema invariant stops the replay with a coded
//! [`WalkThroughError`].
//!
//! ```
//! use sqlreview_catalog::{DatabaseState, Statement};
//! use sqlreview_types::Dialect;
//!
//! let statements = Statement::list_from_json(r#"[
//!     {"line": 1, "type": "create_table", "table": {"name": "t"},
//!      "columns": [{"name": "id", "type": "int"}]},
//!     {"line": 2, "type": "alter_table", "table": {"name": "t"},
//!      "specs": [{"action": "drop_column", "name": "id"}]}
//! ]"#).unwrap();
//!
//! let mut db = DatabaseState::new("shop", Dialect::MySQL);
//! let err = db.walk_through(&statements).unwrap_err();
//! assert_eq!(err.line, Some(2));
//! ```
//!
//! # Features
//!
//! - `tracing` - Emit `tracing` events for replayed statements and mutations

pub mod advisor;
pub mod coerce;
pub mod collection;
pub mod error;
pub mod index;
pub mod snapshot;
pub mod state;
pub mod statements;
pub mod traits;
mod trace;
mod walk_through;

pub use advisor::{Advice, Advisor, Registry, Rule, RuleLevel, RuleType, Status, review};
pub use coerce::{DefaultCoercion, MySqlCoercion, NoCoercion};
pub use error::{Code, WalkThroughError};
pub use index::IndexSpec;
pub use snapshot::{DatabaseSnapshot, SnapshotError, TableSnapshot};
pub use state::{DatabaseState, IntegrityMode, SchemaState, TableState, ViewState};
pub use statements::{Statement, StatementKind};
pub use traits::{Entity, EntityKind, IdentifierCase};
