//! Statement replay
//!
//! [`DatabaseState::walk_through`] applies statements in order and stops at
//! the first violation. There is no rollback: the catalog keeps whatever the
//! failing statement had already changed.

use sqlreview_types::mysql::ddl::{PRIMARY_KEY_NAME, Table};

use crate::coerce::{DefaultCoercion, MySqlCoercion};
use crate::error::{Result, WalkThroughError};
use crate::state::{DatabaseState, TableState, ViewState};
use crate::statements::{
    AlterDatabaseStatement, AlterSpec, AlterTableStatement, ColumnPosition, Constraint,
    CreateIndexStatement, CreateTableStatement, CreateViewStatement, DatabaseOption,
    DropTableStatement, InsertStatement, RenamePair, Statement, StatementKind, TableName,
    TableOption,
};
use crate::{sqlreview_trace_mutation, sqlreview_trace_statement, sqlreview_trace_violation};

impl DatabaseState {
    /// Replay statements with MySQL default coercion
    pub fn walk_through(&mut self, statements: &[Statement]) -> Result<()> {
        self.walk_through_with(statements, &MySqlCoercion)
    }

    /// Replay statements, checking literal defaults with `coercion`
    pub fn walk_through_with(
        &mut self,
        statements: &[Statement],
        coercion: &dyn DefaultCoercion,
    ) -> Result<()> {
        if !self.dialect.is_mysql_family() {
            return Err(WalkThroughError::unsupported(format!(
                "Walk-through doesn't support engine type: {}",
                self.dialect
            )));
        }

        for statement in statements {
            sqlreview_trace_statement!(statement.line, statement.kind.type_name());
            if let Err(err) = self.apply(statement, coercion) {
                let err = err.or_line(statement.line);
                sqlreview_trace_violation!(err);
                return Err(err);
            }
        }
        Ok(())
    }

    fn apply(&mut self, statement: &Statement, coercion: &dyn DefaultCoercion) -> Result<()> {
        if self.deleted {
            return Err(WalkThroughError::database_deleted(&self.name));
        }

        match &statement.kind {
            StatementKind::CreateTable(create) => {
                self.create_table(create, &statement.text, coercion)
            }
            StatementKind::AlterTable(alter) => self.alter_table(alter, coercion),
            StatementKind::DropTable(drop_table) => self.drop_tables(drop_table),
            StatementKind::RenameTable(rename) => rename
                .pairs
                .iter()
                .try_for_each(|pair| self.rename_pair(pair)),
            StatementKind::CreateIndex(create) => self.create_index(create),
            StatementKind::DropIndex(drop_index) => self
                .find_table(&drop_index.table)?
                .drop_index(&drop_index.name),
            StatementKind::CreateView(view) => self.create_view(view),
            StatementKind::CreateDatabase(create) => Err(WalkThroughError::not_current_database(
                &create.name,
                &self.name,
            )),
            StatementKind::AlterDatabase(alter) => self.alter_database(alter),
            StatementKind::DropDatabase(drop_database) => {
                self.check_database(&drop_database.name)?;
                sqlreview_trace_mutation!("drop_database", drop_database.name, self.name);
                self.deleted = true;
                Ok(())
            }
            StatementKind::CreateTrigger(trigger) => self.find_table(&trigger.table).map(|_| ()),
            StatementKind::CreateProcedure(_) | StatementKind::CreateEvent(_) => Ok(()),
            StatementKind::Insert(insert) => self.check_insert(insert),
            StatementKind::Other => Ok(()),
        }
    }

    /// Look up an existing table; table existence is always strict
    fn find_table(&mut self, name: &TableName) -> Result<&mut TableState> {
        self.check_scope(name.database())?;
        self.schema.table_mut(&name.name)
    }

    /// Reject database-level statements naming another database
    fn check_database(&self, name: &str) -> Result<()> {
        if !self.name.is_empty() && !self.case.equals(name, &self.name) {
            return Err(WalkThroughError::not_current_database(name, &self.name));
        }
        Ok(())
    }

    // =========================================================================
    // Tables
    // =========================================================================

    fn create_table(
        &mut self,
        create: &CreateTableStatement,
        text: &str,
        coercion: &dyn DefaultCoercion,
    ) -> Result<()> {
        self.check_scope(create.table.database())?;

        let name = &create.table.name;
        if self.schema.name_taken(name) {
            if create.if_not_exists {
                return Ok(());
            }
            return Err(WalkThroughError::table_exists(name));
        }

        if let Some(query) = &create.as_select {
            let statement = if text.is_empty() {
                format!("CREATE TABLE {name} AS {query}")
            } else {
                text.to_string()
            };
            return Err(WalkThroughError::create_table_as(&statement));
        }

        if let Some(source) = &create.like {
            return self.copy_table(name, source);
        }

        let mut table = TableState::new(Table::new(name.clone()));
        apply_table_options(&mut table, &create.options);

        for column in &create.columns {
            table
                .create_column(column, &ColumnPosition::None, coercion)
                .map_err(|err| stamp(err, column.line))?;
        }
        for constraint in &create.constraints {
            table
                .create_constraint(constraint)
                .map_err(|err| stamp(err, constraint.line))?;
        }

        self.schema.create_table(table)
    }

    /// `CREATE TABLE name LIKE source`
    fn copy_table(&mut self, name: &str, source: &TableName) -> Result<()> {
        if let Some(db) = source.database()
            && !self.is_current(Some(db))
        {
            return Err(WalkThroughError::reference_other_database(&source.name, db));
        }
        let mut table = self
            .schema
            .table(&source.name)
            .cloned()
            .ok_or_else(|| WalkThroughError::table_not_exists(&source.name))?;
        table.table.name = name.to_string().into();
        self.schema.create_table(table)
    }

    fn drop_tables(&mut self, drop: &DropTableStatement) -> Result<()> {
        if drop.is_view {
            for view in &drop.tables {
                self.schema.views.delete(&view.name);
            }
            return Ok(());
        }
        for table in &drop.tables {
            self.check_scope(table.database())?;
            self.schema.drop_table(&table.name, drop.if_exists)?;
        }
        Ok(())
    }

    /// One `from TO to` pair of RENAME TABLE
    fn rename_pair(&mut self, pair: &RenamePair) -> Result<()> {
        let from_current = self.is_current(pair.from.database());
        let to_current = self.is_current(pair.to.database());

        match (from_current, to_current) {
            (true, true) => self.schema.rename_table(&pair.from.name, &pair.to.name),
            (true, false) => {
                // moved out of the reviewed database
                self.schema.drop_table(&pair.from.name, false).map(|_| ())
            }
            (false, _) => {
                let target = pair.from.database().unwrap_or_default();
                Err(WalkThroughError::not_current_database(target, &self.name))
            }
        }
    }

    fn alter_table(
        &mut self,
        alter: &AlterTableStatement,
        coercion: &dyn DefaultCoercion,
    ) -> Result<()> {
        let mut current = self.find_table(&alter.table)?.name().to_string();

        for spec in &alter.specs {
            if let AlterSpec::RenameTable { new_name } = spec {
                let pair = RenamePair {
                    from: TableName::new(current.clone()),
                    to: new_name.clone(),
                };
                self.rename_pair(&pair)?;
                current.clone_from(&new_name.name);
                continue;
            }
            self.schema.table_mut(&current)?.apply_alter(spec, coercion)?;
        }
        Ok(())
    }

    fn create_index(&mut self, create: &CreateIndexStatement) -> Result<()> {
        let table = self.find_table(&create.table)?;
        let constraint = Constraint {
            kind: create.kind,
            name: Some(create.name.clone()),
            keys: create.keys.clone(),
            options: create.options.clone(),
            kind_options: Vec::new(),
            line: None,
        };
        table.create_constraint(&constraint)
    }

    fn create_view(&mut self, create: &CreateViewStatement) -> Result<()> {
        self.check_scope(create.view.database())?;
        let name = &create.view.name;
        if self.schema.tables.contains(name) {
            return Err(WalkThroughError::table_exists(name));
        }
        if let Some(view) = self.schema.views.get_mut(name) {
            if !create.or_replace {
                return Err(WalkThroughError::table_exists(name));
            }
            view.definition.clone_from(&create.definition);
            return Ok(());
        }
        self.schema.views.push(ViewState {
            name: name.clone(),
            definition: create.definition.clone(),
        });
        Ok(())
    }

    fn check_insert(&mut self, insert: &InsertStatement) -> Result<()> {
        let table = self.find_table(&insert.table)?;
        if !table.is_complete() {
            return Ok(());
        }
        match insert.columns.iter().find(|c| table.column(c).is_none()) {
            Some(missing) => Err(WalkThroughError::column_not_exists(table.name(), missing)),
            None => Ok(()),
        }
    }

    // =========================================================================
    // Databases
    // =========================================================================

    fn alter_database(&mut self, alter: &AlterDatabaseStatement) -> Result<()> {
        if let Some(name) = &alter.name {
            self.check_database(name)?;
        }
        for option in &alter.options {
            match option {
                DatabaseOption::Charset(charset) => self.charset = Some(charset.clone()),
                DatabaseOption::Collate(collation) => self.collation = Some(collation.clone()),
            }
        }
        Ok(())
    }
}

impl TableState {
    /// Apply one ALTER TABLE sub-action other than RENAME TO
    fn apply_alter(&mut self, spec: &AlterSpec, coercion: &dyn DefaultCoercion) -> Result<()> {
        match spec {
            AlterSpec::Options { options } => {
                apply_table_options(self, options);
                Ok(())
            }
            AlterSpec::AddColumns {
                columns,
                position,
                constraints,
            } => {
                // a position only applies to a single added column
                let position = if columns.len() == 1 {
                    position.clone()
                } else {
                    ColumnPosition::None
                };
                for column in columns {
                    self.create_column(column, &position, coercion)?;
                }
                constraints
                    .iter()
                    .try_for_each(|constraint| self.create_constraint(constraint))
            }
            AlterSpec::AddConstraint { constraint } => self.create_constraint(constraint),
            AlterSpec::DropColumn { name } => self.drop_column(name),
            AlterSpec::DropPrimaryKey => self.drop_index(PRIMARY_KEY_NAME),
            AlterSpec::DropIndex { name } => self.drop_index(name),
            AlterSpec::ModifyColumn { column, position } => {
                self.change_column(&column.name, column, position, coercion)
            }
            AlterSpec::ChangeColumn {
                old_name,
                column,
                position,
            } => self.change_column(old_name, column, position, coercion),
            AlterSpec::RenameColumn { old_name, new_name } => {
                self.rename_column(old_name, new_name)
            }
            AlterSpec::SetDefault { column, value } => {
                self.change_column_default(column, Some(value), coercion)
            }
            AlterSpec::DropDefault { column } => self.change_column_default(column, None, coercion),
            AlterSpec::IndexVisibility { name, visible } => {
                self.change_index_visibility(name, *visible)
            }
            AlterSpec::RenameIndex { old_name, new_name } => self.rename_index(old_name, new_name),
            // handled by the database, which owns the table collection
            AlterSpec::RenameTable { .. } => Ok(()),
            AlterSpec::DropForeignKey { .. } | AlterSpec::Other => Ok(()),
        }
    }
}

fn apply_table_options(table: &mut TableState, options: &[TableOption]) {
    for option in options {
        match option {
            TableOption::Engine(engine) => table.table.engine = Some(engine.clone().into()),
            TableOption::Collate(collation) => {
                table.table.collation = Some(collation.clone().into());
            }
            TableOption::Comment(comment) => table.table.comment = Some(comment.clone().into()),
            TableOption::Charset(_) | TableOption::Other(_) => {}
        }
    }
}

/// Prefer the line of the failing column or constraint over the statement's
fn stamp(err: WalkThroughError, line: Option<usize>) -> WalkThroughError {
    match line {
        Some(line) => err.or_line(line),
        None => err,
    }
}
