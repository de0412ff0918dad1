//! # sqlreview
//!
//! Incremental schema-integrity validation for reviewed SQL change batches.
//!
//! A batch of parsed DDL statements is replayed against an in-memory catalog
//! of one MySQL-family database. The first statement that would break an
//! invariant (dropping the last column, a second primary key, a default that
//! does not fit its column) stops the replay with a coded violation. A clean
//! replay then runs the configured review rules against the final catalog.
//!
//! ```rust
//! use sqlreview::prelude::*;
//!
//! let statements = Statement::list_from_json(r#"[
//!     {"line": 1, "type": "create_table", "table": {"name": "t"},
//!      "columns": [{"name": "a", "type": "int", "options": ["primary_key"]}]},
//!     {"line": 2, "type": "alter_table", "table": {"name": "t"},
//!      "specs": [{"action": "add_constraint",
//!                 "constraint": {"kind": "primary_key", "keys": [{"column": "a"}]}}]}
//! ]"#).unwrap();
//!
//! let mut state = DatabaseState::new("shop", Dialect::MySQL);
//! let advice = review(&mut state, &statements, &[], &Registry::with_builtin());
//! assert_eq!(advice[0].code, Code::PrimaryKeyExists);
//! assert_eq!(advice[0].line, Some(2));
//! ```
//!
//! ## Crates
//!
//! | Crate               | Contents                                         |
//! |---------------------|--------------------------------------------------|
//! | `sqlreview-types`   | Dialects, DDL records, SQL type classification   |
//! | `sqlreview-catalog` | Catalog, walk-through, snapshots, review rules   |
//! | `sqlreview-cli`     | The `sqlreview` binary                           |

pub use sqlreview_catalog as catalog;
pub use sqlreview_types as types;

pub use sqlreview_catalog::{
    Advice, Code, DatabaseSnapshot, DatabaseState, IntegrityMode, WalkThroughError, review,
};
pub use sqlreview_types::Dialect;

/// Commonly used items for replaying and reviewing batches
pub mod prelude {
    pub use sqlreview_catalog::{
        Advice, Advisor, Code, DatabaseSnapshot, DatabaseState, IdentifierCase, IntegrityMode,
        Registry, Rule, RuleLevel, RuleType, Statement, StatementKind, Status, WalkThroughError,
        review,
    };
    pub use sqlreview_types::Dialect;
}
