//! Catalog state: database → schema → table → {column, index}
//!
//! Column and index names are compared case-insensitively, as MySQL does.
//! Table and view names follow the configured [`IdentifierCase`].

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use sqlreview_types::Dialect;
use sqlreview_types::mysql::SqlType;
use sqlreview_types::mysql::ddl::{Column, ColumnDef, Index, IndexDef, Table, TableDef};

use crate::coerce::DefaultCoercion;
use crate::collection::Collection;
use crate::error::{Code, Result, WalkThroughError};
use crate::index::IndexSpec;
use crate::sqlreview_trace_mutation;
use crate::statements::{ColumnDefinition, ColumnOption, ColumnPosition, DefaultValue, KeyPart};
use crate::traits::{Entity, EntityKind, IdentifierCase};

/// How unresolved column and index references are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrityMode {
    /// Every reference must resolve
    #[default]
    Strict,
    /// Unresolved references become incomplete placeholders
    Lenient,
}

// =============================================================================
// Table
// =============================================================================

/// A table with its columns and indexes
#[derive(Debug, Clone)]
pub struct TableState {
    pub table: Table,
    pub(crate) columns: Collection<Column>,
    pub(crate) indexes: Collection<Index>,
}

impl Entity for TableState {
    const KIND: EntityKind = EntityKind::Table;

    fn name(&self) -> &str {
        self.table.name()
    }

    fn set_name(&mut self, name: String) {
        self.table.name = Cow::Owned(name);
    }
}

impl TableState {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            columns: Collection::new(IdentifierCase::Insensitive),
            indexes: Collection::new(IdentifierCase::Insensitive),
        }
    }

    pub fn name(&self) -> &str {
        self.table.name()
    }

    /// Whether every column and index of the table is known
    pub const fn is_complete(&self) -> bool {
        self.table.complete
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn index(&self, name: &str) -> Option<&Index> {
        self.indexes.get(name)
    }

    pub fn columns(&self) -> &Collection<Column> {
        &self.columns
    }

    pub fn indexes(&self) -> &Collection<Index> {
        &self.indexes
    }

    /// The primary key, if any
    pub fn primary_key(&self) -> Option<&Index> {
        self.indexes.iter().find(|i| i.is_primary())
    }

    /// Whether the primary key lists `column`
    pub fn in_primary_key(&self, column: &str) -> bool {
        let case = self.columns.case();
        self.primary_key()
            .is_some_and(|pk| pk.expressions().iter().any(|e| case.equals(e, column)))
    }

    /// Columns ordered by position; unpositioned columns last
    pub fn columns_by_position(&self) -> Vec<&Column> {
        let mut columns: Vec<_> = self.columns.iter().collect();
        columns.sort_by_key(|c| c.position.unwrap_or(u32::MAX));
        columns
    }

    /// Indexes ordered by name, the primary key first
    pub fn indexes_sorted(&self) -> Vec<&Index> {
        let mut indexes: Vec<_> = self.indexes.iter().collect();
        indexes.sort_by(|a, b| {
            b.is_primary()
                .cmp(&a.is_primary())
                .then_with(|| a.name().cmp(b.name()))
        });
        indexes
    }

    /// Insert a seeded column; positions are normalized by [`TableState::renumber`]
    pub fn seed_column(&mut self, column: Column) -> Result<()> {
        let name = column.name.to_string();
        if !self.columns.push(column) {
            return Err(WalkThroughError::column_exists(self.name(), &name));
        }
        Ok(())
    }

    /// Insert a seeded index
    pub fn seed_index(&mut self, index: Index) -> Result<()> {
        let name = index.name.to_string();
        if index.is_primary() && self.primary_key().is_some() {
            return Err(WalkThroughError::primary_key_exists(self.name()));
        }
        if !self.indexes.push(index) {
            return Err(WalkThroughError::index_exists(self.name(), &name));
        }
        Ok(())
    }

    /// Build a complete table from const definitions, in declaration order
    ///
    /// ```
    /// use sqlreview_catalog::TableState;
    /// use sqlreview_types::mysql::ddl::{ColumnDef, IndexDef, TableDef};
    ///
    /// const USERS: TableDef = TableDef::new("users");
    /// const COLUMNS: &[ColumnDef] = &[
    ///     ColumnDef::new("id", "bigint"),
    ///     ColumnDef::new("email", "varchar(255)"),
    /// ];
    /// const INDEXES: &[IndexDef] = &[IndexDef::primary_key(&["id"])];
    ///
    /// let users = TableState::from_defs(USERS, COLUMNS, INDEXES).unwrap();
    /// assert!(users.column("id").unwrap().is_not_null());
    /// assert_eq!(users.column("email").unwrap().position, Some(2));
    /// ```
    pub fn from_defs(def: TableDef, columns: &[ColumnDef], indexes: &[IndexDef]) -> Result<Self> {
        let mut table = Self::new(def.into_table());
        for (column, position) in columns.iter().zip(1..) {
            table.seed_column(column.into_column(position))?;
        }
        for index in indexes {
            let index = index.into_index();
            if index.is_primary() {
                for key in index.expressions() {
                    if let Some(column) = table.columns.get_mut(key) {
                        if column.has_null_default() {
                            return Err(WalkThroughError::null_default_for_not_null(key));
                        }
                        column.nullable = Some(false);
                    }
                }
            }
            table.seed_index(index)?;
        }
        Ok(table)
    }

    /// Reassign contiguous positions 1..N keeping the current order
    pub fn renumber(&mut self) {
        let order: Vec<String> = self
            .columns_by_position()
            .into_iter()
            .map(|c| c.name.to_string())
            .collect();
        for (idx, name) in order.iter().enumerate() {
            if let Some(column) = self.columns.get_mut(name) {
                column.position = Some(idx as u32 + 1);
            }
        }
    }

    fn position_of(&self, name: &str) -> Result<u32> {
        self.columns
            .get(name)
            .and_then(|c| c.position)
            .ok_or_else(|| WalkThroughError::column_not_exists(self.name(), name))
    }

    fn shift_positions(&mut self, after: u32, up: bool) {
        self.columns.update_where(
            |c| c.position.is_some_and(|p| p > after),
            |c| {
                if let Some(p) = c.position.as_mut() {
                    if up {
                        *p += 1;
                    } else {
                        *p -= 1;
                    }
                }
            },
        );
    }

    // =========================================================================
    // Column Position Engine
    // =========================================================================

    /// Make room for a new column and return the position it should take
    pub fn reorder_column(&mut self, position: &ColumnPosition) -> Result<u32> {
        match position {
            ColumnPosition::None => Ok(self.columns.len() as u32 + 1),
            ColumnPosition::First => {
                self.shift_positions(0, true);
                Ok(1)
            }
            ColumnPosition::After(target) => {
                let pos = self.position_of(target)?;
                self.shift_positions(pos, true);
                Ok(pos + 1)
            }
        }
    }

    /// Add a column from its definition
    ///
    /// Inline `PRIMARY KEY` and `UNIQUE` create the matching index once the
    /// column is in place. Explicit positions are ignored for incomplete
    /// tables.
    pub fn create_column(
        &mut self,
        definition: &ColumnDefinition,
        position: &ColumnPosition,
        coercion: &dyn DefaultCoercion,
    ) -> Result<()> {
        if self.columns.contains(&definition.name) {
            return Err(WalkThroughError::column_exists(self.name(), &definition.name));
        }

        let column = self.build_column(definition, coercion)?;
        if column.auto_increment && self.columns.iter().any(|c| c.auto_increment) {
            return Err(WalkThroughError::auto_increment_exists(self.name()));
        }

        let pos = if self.is_complete() {
            self.reorder_column(position)?
        } else {
            self.columns.len() as u32 + 1
        };

        let name = column.name.to_string();
        sqlreview_trace_mutation!("create_column", self.name(), name);
        self.columns.push(Column {
            position: Some(pos),
            ..column
        });

        for option in &definition.options {
            match option {
                ColumnOption::PrimaryKey => {
                    self.create_primary_key(vec![name.clone()], Default::default())?;
                }
                ColumnOption::Unique => {
                    let keys = vec![name.clone()];
                    self.create_index(IndexSpec::new(keys).unique())?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Turn a definition into a column, validating defaults and ON UPDATE
    fn build_column(
        &self,
        definition: &ColumnDefinition,
        coercion: &dyn DefaultCoercion,
    ) -> Result<Column> {
        let ty = SqlType::parse(&definition.sql_type);
        let mut column = Column::new(definition.name.clone(), definition.sql_type.clone());
        column.charset = definition.charset.clone().map(Cow::Owned);
        column.collation = definition.collation.clone().map(Cow::Owned);

        let mut default = None;
        let mut on_update = false;
        for option in &definition.options {
            match option {
                ColumnOption::PrimaryKey | ColumnOption::NotNull => column.nullable = Some(false),
                ColumnOption::Null => column.nullable = Some(true),
                ColumnOption::AutoIncrement => column.auto_increment = true,
                ColumnOption::Default(value) => default = Some(value),
                ColumnOption::OnUpdate(_) => on_update = true,
                ColumnOption::Comment(comment) => column.comment = Some(Cow::Owned(comment.clone())),
                ColumnOption::Collate(collation) => {
                    column.collation = Some(Cow::Owned(collation.clone()));
                }
                ColumnOption::Unique | ColumnOption::Other(_) => {}
            }
        }
        // PRIMARY KEY wins over an explicit NULL, as does an existing
        // primary key still listing the column after CHANGE / MODIFY
        if definition
            .options
            .iter()
            .any(|o| matches!(o, ColumnOption::PrimaryKey))
            || self.in_primary_key(&definition.name)
        {
            column.nullable = Some(false);
        }

        if let Some(value) = default {
            validate_default(&definition.name, Some(&ty), column.is_not_null(), value, coercion)?;
            column.default = Some(Cow::Owned(value.to_sql()));
        }
        if on_update && !ty.accepts_on_update() {
            return Err(WalkThroughError::on_update_not_temporal(&definition.name));
        }
        Ok(column)
    }

    /// Remove a column, cascading into indexes
    pub fn drop_column(&mut self, name: &str) -> Result<()> {
        let position = match self.columns.get(name) {
            Some(column) => column.position,
            None if self.is_complete() => {
                return Err(WalkThroughError::column_not_exists(self.name(), name));
            }
            None => None,
        };

        if self.is_complete() && self.columns.len() == 1 {
            return Err(WalkThroughError::drop_all_columns(self.name()));
        }

        sqlreview_trace_mutation!("drop_column", self.name(), name);
        self.drop_column_from_indexes(name);
        if self.is_complete()
            && let Some(pos) = position
        {
            self.shift_positions(pos, false);
        }
        self.columns.delete(name);
        Ok(())
    }

    /// Rename a column in place, rewriting index expressions
    pub fn rename_column(&mut self, old: &str, new: &str) -> Result<()> {
        if old == new {
            return Ok(());
        }
        let case_only = self.columns.case().equals(old, new);

        if !case_only && self.columns.contains(new) {
            return Err(WalkThroughError::column_exists(self.name(), new));
        }
        if !self.columns.contains(old) {
            if self.is_complete() {
                return Err(WalkThroughError::column_not_exists(self.name(), old));
            }
            self.columns.push(Column::placeholder(new.to_string()));
        } else {
            self.columns.rename(old, new);
        }

        sqlreview_trace_mutation!("rename_column", self.name(), new);
        self.rename_column_in_indexes(old, new);
        Ok(())
    }

    /// `CHANGE` / `MODIFY`: drop the old column and create the new definition
    ///
    /// Without an explicit position the column keeps its slot.
    pub fn change_column(
        &mut self,
        old: &str,
        definition: &ColumnDefinition,
        position: &ColumnPosition,
        coercion: &dyn DefaultCoercion,
    ) -> Result<()> {
        if !self.is_complete() {
            self.columns.delete(old);
            self.rename_column_in_indexes(old, &definition.name);
            return self.create_column(definition, position, coercion);
        }

        let pos = self.position_of(old)?;
        let position = match position {
            ColumnPosition::None if pos == 1 => ColumnPosition::First,
            ColumnPosition::None => self
                .columns
                .iter()
                .find(|c| c.position == Some(pos - 1))
                .map_or(ColumnPosition::None, |c| {
                    ColumnPosition::After(c.name.to_string())
                }),
            explicit => explicit.clone(),
        };

        sqlreview_trace_mutation!("change_column", self.name(), old);
        self.shift_positions(pos, false);
        self.columns.delete(old);
        self.rename_column_in_indexes(old, &definition.name);
        self.create_column(definition, &position, coercion)
    }

    /// `ALTER COLUMN SET DEFAULT` (`Some`) or `DROP DEFAULT` (`None`)
    pub fn change_column_default(
        &mut self,
        name: &str,
        value: Option<&DefaultValue>,
        coercion: &dyn DefaultCoercion,
    ) -> Result<()> {
        if !self.columns.contains(name) {
            if self.is_complete() {
                return Err(WalkThroughError::column_not_exists(self.name(), name));
            }
            self.columns.push(Column::placeholder(name.to_string()));
        }
        let Some(column) = self.columns.get_mut(name) else {
            return Err(WalkThroughError::column_not_exists(self.name(), name));
        };

        match value {
            Some(value) => {
                let ty = column.sql_type.as_deref().map(SqlType::parse);
                validate_default(name, ty.as_ref(), column.is_not_null(), value, coercion)?;
                column.default = Some(Cow::Owned(value.to_sql()));
            }
            None => column.default = None,
        }
        Ok(())
    }

    /// Canonical column name for a key part, or the verbatim expression
    pub(crate) fn key_name(&self, key: &KeyPart) -> String {
        match key {
            KeyPart::Column(name) => self
                .columns
                .get(name)
                .map_or_else(|| name.clone(), |c| c.name.to_string()),
            KeyPart::Expression(expr) => expr.clone(),
        }
    }
}

/// Default checks shared by column definitions and `SET DEFAULT`
fn validate_default(
    column: &str,
    ty: Option<&SqlType>,
    not_null: bool,
    value: &DefaultValue,
    coercion: &dyn DefaultCoercion,
) -> Result<()> {
    if value.is_null() {
        if not_null {
            return Err(WalkThroughError::null_default_for_not_null(column));
        }
        return Ok(());
    }
    let Some(ty) = ty else {
        return Ok(());
    };
    if ty.forbids_default() {
        return Err(WalkThroughError::default_forbidden(column));
    }
    if value.is_literal() {
        coercion
            .coerce(value, ty)
            .map_err(|message| WalkThroughError::new(Code::InvalidColumnDefault, message))?;
    }
    Ok(())
}

// =============================================================================
// View / Schema
// =============================================================================

/// A tracked view; only its name and definition text are known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub name: String,
    pub definition: Option<String>,
}

impl Entity for ViewState {
    const KIND: EntityKind = EntityKind::View;

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// The single schema of a MySQL database
#[derive(Debug, Clone, Default)]
pub struct SchemaState {
    pub(crate) tables: Collection<TableState>,
    pub(crate) views: Collection<ViewState>,
}

impl SchemaState {
    pub fn new(case: IdentifierCase) -> Self {
        Self {
            tables: Collection::new(case),
            views: Collection::new(case),
        }
    }

    pub fn table(&self, name: &str) -> Option<&TableState> {
        self.tables.get(name)
    }

    pub fn table_mut(&mut self, name: &str) -> Result<&mut TableState> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| WalkThroughError::table_not_exists(name))
    }

    pub fn view(&self, name: &str) -> Option<&ViewState> {
        self.views.get(name)
    }

    pub fn tables(&self) -> &Collection<TableState> {
        &self.tables
    }

    pub fn views(&self) -> &Collection<ViewState> {
        &self.views
    }

    /// Whether a table or view already uses `name`
    pub fn name_taken(&self, name: &str) -> bool {
        self.tables.contains(name) || self.views.contains(name)
    }

    pub fn create_table(&mut self, table: TableState) -> Result<()> {
        if self.name_taken(table.name()) {
            return Err(WalkThroughError::table_exists(table.name()));
        }
        sqlreview_trace_mutation!("create_table", table.name(), table.columns.len());
        self.tables.push(table);
        Ok(())
    }

    /// Remove a table; `Ok(false)` when missing and `if_exists` is set
    pub fn drop_table(&mut self, name: &str, if_exists: bool) -> Result<bool> {
        match self.tables.delete(name) {
            Some(_) => {
                sqlreview_trace_mutation!("drop_table", name, name);
                Ok(true)
            }
            None if if_exists => Ok(false),
            None => Err(WalkThroughError::table_not_exists(name)),
        }
    }

    /// Rename a table in place; renaming an existing table to its own name
    /// is a no-op
    pub fn rename_table(&mut self, old: &str, new: &str) -> Result<()> {
        if !self.tables.contains(old) {
            return Err(WalkThroughError::table_not_exists(old));
        }
        if self.tables.case().equals(old, new) {
            return Ok(());
        }
        if self.name_taken(new) {
            return Err(WalkThroughError::table_exists(new));
        }
        sqlreview_trace_mutation!("rename_table", old, new);
        self.tables.rename(old, new);
        Ok(())
    }
}

// =============================================================================
// Database
// =============================================================================

/// The root of the catalog for one review run
#[derive(Debug, Clone)]
pub struct DatabaseState {
    pub(crate) name: String,
    pub(crate) dialect: Dialect,
    pub charset: Option<String>,
    pub collation: Option<String>,
    pub(crate) deleted: bool,
    pub(crate) schema: SchemaState,
    pub(crate) case: IdentifierCase,
    pub(crate) mode: IntegrityMode,
}

impl DatabaseState {
    /// An empty strict, case-insensitive database
    pub fn new(name: impl Into<String>, dialect: Dialect) -> Self {
        Self {
            name: name.into(),
            dialect,
            charset: None,
            collation: None,
            deleted: false,
            schema: SchemaState::new(IdentifierCase::default()),
            case: IdentifierCase::default(),
            mode: IntegrityMode::default(),
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: IntegrityMode) -> Self {
        self.mode = mode;
        self
    }

    /// Change how table names compare; existing tables and views are re-keyed
    ///
    /// Fails with `TableExists` when two names collide under the new mode.
    pub fn with_case(mut self, case: IdentifierCase) -> Result<Self> {
        let old = std::mem::replace(&mut self.schema, SchemaState::new(case));
        for table in old.tables.list() {
            if self.schema.name_taken(table.name()) {
                return Err(WalkThroughError::table_exists(table.name()));
            }
            self.schema.tables.push(table.clone());
        }
        for view in old.views.list() {
            if self.schema.name_taken(&view.name) {
                return Err(WalkThroughError::table_exists(&view.name));
            }
            self.schema.views.push(view.clone());
        }
        self.case = case;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub const fn mode(&self) -> IntegrityMode {
        self.mode
    }

    pub const fn case(&self) -> IdentifierCase {
        self.case
    }

    pub const fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn schema(&self) -> &SchemaState {
        &self.schema
    }

    pub fn table(&self, name: &str) -> Option<&TableState> {
        self.schema.table(name)
    }

    /// Seed a pre-existing table. In lenient mode the table is marked
    /// incomplete since its history was not observed.
    pub fn seed_table(&mut self, mut table: TableState) -> Result<()> {
        if self.mode == IntegrityMode::Lenient {
            table.table.complete = false;
        }
        if table.is_complete() {
            table.renumber();
        }
        self.schema.create_table(table)
    }

    /// Whether a database qualifier refers to this database
    pub(crate) fn is_current(&self, database: Option<&str>) -> bool {
        database.is_none_or(|db| self.name.is_empty() || self.case.equals(db, &self.name))
    }

    /// Reject qualifiers naming another database
    pub(crate) fn check_scope(&self, database: Option<&str>) -> Result<()> {
        match database {
            Some(db) if !self.is_current(Some(db)) => {
                Err(WalkThroughError::not_current_database(db, &self.name))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::MySqlCoercion;

    fn table(columns: &[&str]) -> TableState {
        let mut t = TableState::new(Table::new("t"));
        for name in columns {
            t.create_column(
                &ColumnDefinition::new(*name, "int"),
                &ColumnPosition::None,
                &MySqlCoercion,
            )
            .unwrap();
        }
        t
    }

    fn order(t: &TableState) -> Vec<(String, u32)> {
        t.columns_by_position()
            .into_iter()
            .map(|c| (c.name.to_string(), c.position.unwrap()))
            .collect()
    }

    fn pairs(names: &[&str]) -> Vec<(String, u32)> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| ((*n).to_string(), i as u32 + 1))
            .collect()
    }

    #[test]
    fn test_insert_first_and_after() {
        let mut t = table(&["a", "b"]);
        let def = ColumnDefinition::new("x", "int");
        t.create_column(&def, &ColumnPosition::First, &MySqlCoercion)
            .unwrap();
        assert_eq!(order(&t), pairs(&["x", "a", "b"]));

        let def = ColumnDefinition::new("y", "int");
        t.create_column(&def, &ColumnPosition::After("A".into()), &MySqlCoercion)
            .unwrap();
        assert_eq!(order(&t), pairs(&["x", "a", "y", "b"]));

        let def = ColumnDefinition::new("z", "int");
        let err = t
            .create_column(&def, &ColumnPosition::After("nope".into()), &MySqlCoercion)
            .unwrap_err();
        assert_eq!(err.code, Code::ColumnNotExists);
    }

    #[test]
    fn test_drop_shifts_positions() {
        let mut t = table(&["a", "b", "c"]);
        t.drop_column("b").unwrap();
        assert_eq!(order(&t), pairs(&["a", "c"]));
    }

    #[test]
    fn test_change_keeps_slot() {
        let mut t = table(&["a", "b", "c"]);
        let def = ColumnDefinition::new("bb", "bigint");
        t.change_column("b", &def, &ColumnPosition::None, &MySqlCoercion)
            .unwrap();
        assert_eq!(order(&t), pairs(&["a", "bb", "c"]));

        let def = ColumnDefinition::new("a", "bigint");
        t.change_column("a", &def, &ColumnPosition::None, &MySqlCoercion)
            .unwrap();
        assert_eq!(order(&t), pairs(&["a", "bb", "c"]));

        let def = ColumnDefinition::new("c", "int");
        t.change_column("c", &def, &ColumnPosition::First, &MySqlCoercion)
            .unwrap();
        assert_eq!(order(&t), pairs(&["c", "a", "bb"]));
    }

    #[test]
    fn test_null_default_on_not_null() {
        let mut t = table(&["a"]);
        let def = ColumnDefinition::new("b", "int")
            .option(ColumnOption::Default(DefaultValue::Null))
            .option(ColumnOption::NotNull);
        let err = t
            .create_column(&def, &ColumnPosition::None, &MySqlCoercion)
            .unwrap_err();
        assert_eq!(err.code, Code::SetNullDefaultForNotNullColumn);
        assert_eq!(err.content, "Invalid default value for column `b`");
    }

    #[test]
    fn test_on_update_requires_datetime() {
        let mut t = table(&["a"]);
        let ok = ColumnDefinition::new("updated", "timestamp")
            .option(ColumnOption::OnUpdate("CURRENT_TIMESTAMP".into()));
        t.create_column(&ok, &ColumnPosition::None, &MySqlCoercion)
            .unwrap();
        let bad = ColumnDefinition::new("n", "int")
            .option(ColumnOption::OnUpdate("CURRENT_TIMESTAMP".into()));
        let err = t
            .create_column(&bad, &ColumnPosition::None, &MySqlCoercion)
            .unwrap_err();
        assert_eq!(err.code, Code::OnUpdateColumnNotDatetimeOrTimestamp);
    }

    #[test]
    fn test_second_auto_increment_rejected() {
        let mut t = TableState::new(Table::new("t"));
        let id = ColumnDefinition::new("id", "int").option(ColumnOption::AutoIncrement);
        t.create_column(&id, &ColumnPosition::None, &MySqlCoercion)
            .unwrap();
        let seq = ColumnDefinition::new("seq", "int").option(ColumnOption::AutoIncrement);
        let err = t
            .create_column(&seq, &ColumnPosition::None, &MySqlCoercion)
            .unwrap_err();
        assert_eq!(err.code, Code::AutoIncrementExists);
    }

    #[test]
    fn test_incomplete_table_ignores_positions() {
        let mut t = TableState::new(Table::new("t"));
        t.table.complete = false;
        t.seed_column(Column::new("a", "int")).unwrap();
        let def = ColumnDefinition::new("b", "int");
        t.create_column(&def, &ColumnPosition::After("ghost".into()), &MySqlCoercion)
            .unwrap();
        assert_eq!(t.column("b").unwrap().position, Some(2));

        t.drop_column("missing").unwrap();
        t.drop_column("a").unwrap();
        t.drop_column("b").unwrap();
        assert!(t.columns().is_empty());
    }

    #[test]
    fn test_schema_rename_table() {
        let mut schema = SchemaState::new(IdentifierCase::Insensitive);
        schema.create_table(TableState::new(Table::new("a"))).unwrap();
        schema.create_table(TableState::new(Table::new("b"))).unwrap();
        assert_eq!(
            schema.rename_table("a", "B").unwrap_err().code,
            Code::TableExists
        );
        assert_eq!(
            schema.rename_table("x", "y").unwrap_err().code,
            Code::TableNotExists
        );
        assert_eq!(
            schema.rename_table("ghost", "ghost").unwrap_err().code,
            Code::TableNotExists
        );
        schema.rename_table("a", "A").unwrap();
        schema.rename_table("a", "c").unwrap();
        assert_eq!(schema.table("C").unwrap().name(), "c");
    }

    #[test]
    fn test_with_case_rejects_collisions() {
        let mut db = DatabaseState::new("shop", Dialect::MySQL)
            .with_case(IdentifierCase::Sensitive)
            .unwrap();
        db.seed_table(TableState::new(Table::new("T"))).unwrap();
        db.seed_table(TableState::new(Table::new("t"))).unwrap();

        let err = db.with_case(IdentifierCase::Insensitive).unwrap_err();
        assert_eq!(err.code, Code::TableExists);
        assert_eq!(err.content, "Table `t` already exists");
    }

    #[test]
    fn test_modify_keeps_primary_key_not_null() {
        let mut t = table(&["id", "b"]);
        t.create_primary_key(vec!["id".into()], Default::default())
            .unwrap();
        let def = ColumnDefinition::new("ID", "bigint");
        t.change_column("id", &def, &ColumnPosition::None, &MySqlCoercion)
            .unwrap();
        assert!(t.in_primary_key("id"));
        assert!(t.column("id").unwrap().is_not_null());
        assert!(!t.column("b").unwrap().is_not_null());
    }

    #[test]
    fn test_from_defs() {
        const COLUMNS: &[ColumnDef] = &[
            ColumnDef::new("id", "int"),
            ColumnDef::new("note", "text").comment("free text"),
        ];
        let t = TableState::from_defs(
            TableDef::new("orders").engine("InnoDB"),
            COLUMNS,
            &[IndexDef::primary_key(&["id"]), IndexDef::new("idx_note", &["note"])],
        )
        .unwrap();
        assert_eq!(t.table.engine.as_deref(), Some("InnoDB"));
        assert_eq!(order(&t), pairs(&["id", "note"]));
        assert!(t.column("id").unwrap().is_not_null());
        assert_eq!(t.indexes_sorted()[0].name(), "PRIMARY");

        let err = TableState::from_defs(
            TableDef::new("orders"),
            &[ColumnDef::new("id", "int").default_value("NULL")],
            &[IndexDef::primary_key(&["id"])],
        )
        .unwrap_err();
        assert_eq!(err.code, Code::SetNullDefaultForNotNullColumn);
    }

    #[test]
    fn test_scope() {
        let db = DatabaseState::new("shop", Dialect::MySQL);
        assert!(db.check_scope(None).is_ok());
        assert!(db.check_scope(Some("SHOP")).is_ok());
        let err = db.check_scope(Some("crm")).unwrap_err();
        assert_eq!(
            err.content,
            "Database `crm` is not the current database `shop`"
        );
    }
}
