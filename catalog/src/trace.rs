//! Tracing hooks for walk-through observability.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! These macros no-op when the feature is disabled, avoiding `#[cfg]` boilerplate
//! at every call site.

/// Emit a debug-level event when a statement starts replaying.
///
/// ```ignore
/// sqlreview_trace_statement!(stmt.line, stmt.kind.type_name());
/// ```
#[macro_export]
macro_rules! sqlreview_trace_statement {
    ($line:expr, $kind:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(line = $line, kind = $kind, "sqlreview.statement");
    };
}

/// Emit a debug-level event for a catalog mutation.
///
/// ```ignore
/// sqlreview_trace_mutation!("drop_column", table.name(), column_name);
/// ```
#[macro_export]
macro_rules! sqlreview_trace_mutation {
    ($op:literal, $table:expr, $target:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(op = $op, table = %$table, target = %$target, "sqlreview.catalog");
    };
}

/// Emit a warn-level event when replay stops on a violation.
#[macro_export]
macro_rules! sqlreview_trace_violation {
    ($err:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!(
            code = $err.code.as_i32(),
            line = ?$err.line,
            content = %$err.content,
            "sqlreview.violation"
        );
    };
}
