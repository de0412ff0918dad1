//! Parsed statement nodes consumed by the walk-through
//!
//! A parser upstream turns SQL text into these nodes; the catalog never
//! re-parses text. Nodes are serde-tagged so a batch can be read from JSON:
//!
//! ```json
//! [{"line": 1, "type": "create_table", "table": {"name": "t"},
//!   "columns": [{"name": "id", "type": "int", "options": ["primary_key"]}]}]
//! ```

use serde::{Deserialize, Serialize};
use sqlreview_types::mysql::ddl::{IndexType, NULL_DEFAULT};

// =============================================================================
// Names
// =============================================================================

/// Possibly database-qualified table name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    pub name: String,
}

impl TableName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            database: None,
            name: name.into(),
        }
    }

    pub fn qualified(database: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            database: Some(database.into()),
            name: name.into(),
        }
    }

    /// Database qualifier, `None` when absent or empty
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref().filter(|db| !db.is_empty())
    }
}

// =============================================================================
// Column Definitions
// =============================================================================

/// Where a new or changed column goes
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnPosition {
    /// Append after the last column
    #[default]
    None,
    First,
    After(String),
}

/// A `DEFAULT` expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DefaultValue {
    Null,
    /// Quoted string literal, stored unquoted
    String(String),
    /// Numeric literal as written
    Number(String),
    /// Any other expression, e.g. `CURRENT_TIMESTAMP`
    Expression(String),
}

impl DefaultValue {
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Literals are checked against the column type; expressions are not
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::String(_) | Self::Number(_))
    }

    /// SQL text stored in the catalog
    pub fn to_sql(&self) -> String {
        match self {
            Self::Null => NULL_DEFAULT.to_string(),
            Self::String(s) => format!("'{}'", s.replace('\'', "''")),
            Self::Number(n) | Self::Expression(n) => n.clone(),
        }
    }
}

/// Column attribute inside a column definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnOption {
    PrimaryKey,
    NotNull,
    Null,
    AutoIncrement,
    Unique,
    Default(DefaultValue),
    OnUpdate(String),
    Comment(String),
    Collate(String),
    /// GENERATED ALWAYS AS, CHECK, REFERENCES, STORAGE ... (not tracked)
    Other(String),
}

/// A column definition as written in CREATE TABLE / ADD / CHANGE / MODIFY
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub sql_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ColumnOption>,
    /// Source line of this definition, when it differs from the statement's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            charset: None,
            collation: None,
            options: Vec::new(),
            line: None,
        }
    }

    #[must_use]
    pub fn option(mut self, option: ColumnOption) -> Self {
        self.options.push(option);
        self
    }
}

// =============================================================================
// Keys and Constraints
// =============================================================================

/// One part of an index key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyPart {
    Column(String),
    /// Functional key part, kept verbatim
    Expression(String),
}

/// Index option; the same list shape appears on constraints and CREATE INDEX
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexOption {
    Using(IndexType),
    Visible,
    Invisible,
    Comment(String),
    KeyBlockSize(u32),
}

/// Visibility after scanning every option list; any INVISIBLE wins
pub fn visible_in<'a, I>(option_lists: I) -> bool
where
    I: IntoIterator<Item = &'a [IndexOption]>,
{
    !option_lists
        .into_iter()
        .flatten()
        .any(|o| matches!(o, IndexOption::Invisible))
}

/// Index method named by `USING`, BTREE otherwise
pub fn index_type_in(options: &[IndexOption]) -> IndexType {
    options
        .iter()
        .find_map(|o| match o {
            IndexOption::Using(t @ (IndexType::Btree | IndexType::Hash | IndexType::Rtree)) => {
                Some(*t)
            }
            _ => None,
        })
        .unwrap_or_default()
}

/// Kind of table constraint / index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    PrimaryKey,
    #[default]
    Index,
    Unique,
    FullText,
    Spatial,
    ForeignKey,
    Check,
}

/// Table constraint in CREATE TABLE or ALTER TABLE ADD
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraint {
    pub kind: ConstraintKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub keys: Vec<KeyPart>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<IndexOption>,
    /// Options attached to the FULLTEXT / SPATIAL spelling of the constraint
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kind_options: Vec<IndexOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Constraint {
    pub fn new(kind: ConstraintKind, keys: Vec<KeyPart>) -> Self {
        Self {
            kind,
            name: None,
            keys,
            options: Vec::new(),
            kind_options: Vec::new(),
            line: None,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn option(mut self, option: IndexOption) -> Self {
        self.options.push(option);
        self
    }
}

// =============================================================================
// Table / Database Options
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableOption {
    Engine(String),
    Collate(String),
    Comment(String),
    Charset(String),
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseOption {
    Charset(String),
    Collate(String),
}

// =============================================================================
// ALTER TABLE
// =============================================================================

/// One ALTER TABLE sub-action, applied in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AlterSpec {
    Options {
        options: Vec<TableOption>,
    },
    AddColumns {
        columns: Vec<ColumnDefinition>,
        #[serde(default)]
        position: ColumnPosition,
        #[serde(default)]
        constraints: Vec<Constraint>,
    },
    AddConstraint {
        constraint: Constraint,
    },
    DropColumn {
        name: String,
    },
    DropPrimaryKey,
    DropIndex {
        name: String,
    },
    DropForeignKey {
        name: String,
    },
    ModifyColumn {
        column: ColumnDefinition,
        #[serde(default)]
        position: ColumnPosition,
    },
    ChangeColumn {
        old_name: String,
        column: ColumnDefinition,
        #[serde(default)]
        position: ColumnPosition,
    },
    RenameColumn {
        old_name: String,
        new_name: String,
    },
    SetDefault {
        column: String,
        value: DefaultValue,
    },
    DropDefault {
        column: String,
    },
    IndexVisibility {
        name: String,
        visible: bool,
    },
    RenameTable {
        new_name: TableName,
    },
    RenameIndex {
        old_name: String,
        new_name: String,
    },
    /// Anything not tracked (partitioning, ALGORITHM, ...)
    #[serde(other)]
    Other,
}

/// One pair of RENAME TABLE
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePair {
    pub from: TableName,
    pub to: TableName,
}

// =============================================================================
// Statements
// =============================================================================

/// A parsed top-level statement with its source position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// Last line of the statement in the reviewed text
    #[serde(default)]
    pub line: usize,
    /// Statement text, used in messages that quote it
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(flatten)]
    pub kind: StatementKind,
}

impl Statement {
    pub fn new(line: usize, kind: StatementKind) -> Self {
        Self {
            line,
            text: String::new(),
            kind,
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Load a statement batch from a JSON array
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Closed set of statement kinds the walk-through understands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatementKind {
    CreateTable(CreateTableStatement),
    AlterTable(AlterTableStatement),
    DropTable(DropTableStatement),
    RenameTable(RenameTableStatement),
    CreateIndex(CreateIndexStatement),
    DropIndex(DropIndexStatement),
    CreateView(CreateViewStatement),
    CreateDatabase(CreateDatabaseStatement),
    AlterDatabase(AlterDatabaseStatement),
    DropDatabase(DropDatabaseStatement),
    CreateTrigger(CreateTriggerStatement),
    CreateProcedure(CreateRoutineStatement),
    CreateEvent(CreateRoutineStatement),
    Insert(InsertStatement),
    /// SELECT, SET, GRANT ... nothing to replay
    #[serde(other)]
    Other,
}

impl StatementKind {
    /// Get the type name of this statement
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::CreateTable(_) => "create_table",
            Self::AlterTable(_) => "alter_table",
            Self::DropTable(_) => "drop_table",
            Self::RenameTable(_) => "rename_table",
            Self::CreateIndex(_) => "create_index",
            Self::DropIndex(_) => "drop_index",
            Self::CreateView(_) => "create_view",
            Self::CreateDatabase(_) => "create_database",
            Self::AlterDatabase(_) => "alter_database",
            Self::DropDatabase(_) => "drop_database",
            Self::CreateTrigger(_) => "create_trigger",
            Self::CreateProcedure(_) => "create_procedure",
            Self::CreateEvent(_) => "create_event",
            Self::Insert(_) => "insert",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableStatement {
    pub table: TableName,
    #[serde(default)]
    pub if_not_exists: bool,
    #[serde(default)]
    pub columns: Vec<ColumnDefinition>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    #[serde(default)]
    pub options: Vec<TableOption>,
    /// CREATE TABLE ... LIKE source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like: Option<TableName>,
    /// CREATE TABLE ... AS query text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_select: Option<String>,
}

impl Default for TableName {
    fn default() -> Self {
        Self::new("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlterTableStatement {
    pub table: TableName,
    #[serde(default)]
    pub specs: Vec<AlterSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropTableStatement {
    pub tables: Vec<TableName>,
    #[serde(default)]
    pub if_exists: bool,
    /// DROP VIEW
    #[serde(default)]
    pub is_view: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameTableStatement {
    pub pairs: Vec<RenamePair>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIndexStatement {
    pub name: String,
    pub table: TableName,
    #[serde(default)]
    pub kind: ConstraintKind,
    pub keys: Vec<KeyPart>,
    #[serde(default)]
    pub options: Vec<IndexOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropIndexStatement {
    pub name: String,
    pub table: TableName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateViewStatement {
    pub view: TableName,
    #[serde(default)]
    pub or_replace: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDatabaseStatement {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlterDatabaseStatement {
    /// `None` targets the default database
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub options: Vec<DatabaseOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropDatabaseStatement {
    pub name: String,
    #[serde(default)]
    pub if_exists: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTriggerStatement {
    pub name: String,
    pub table: TableName,
}

/// CREATE PROCEDURE / CREATE EVENT
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoutineStatement {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertStatement {
    pub table: TableName,
    #[serde(default)]
    pub columns: Vec<String>,
}
